use clap::Parser;
use emoji_search::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.debug);

    let stdout = std::io::stdout();
    if let Err(e) = cli::run(&cli, &mut stdout.lock()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
