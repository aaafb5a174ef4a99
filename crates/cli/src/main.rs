//! userchain CLI entry point.

use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "userchain")]
#[command(about = "A tamper-evident user-registration ledger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<commands::Commands>,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(cmd) => {
            if let Err(e) = commands::run(cmd) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("userchain - A tamper-evident user-registration ledger");
            println!("Run 'userchain --help' for usage information.");
        }
    }
}
