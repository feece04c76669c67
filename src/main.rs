use clap::Parser;
use hitakort::cli::{self, Args};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut stdout = std::io::stdout().lock();

    if let Err(e) = cli::run(args, &mut stdout) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
