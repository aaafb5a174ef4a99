//! Self-contained ledger demo.
//!
//! Builds a fresh in-memory ledger, registers a handful of users, and walks
//! through the resulting chain. State lives only for the run.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use userchain_core::Event;
use userchain_ledger::Ledger;

const SAMPLE_USERS: [(&str, &str); 3] = [
    ("alice", "alice@example.com"),
    ("bob", "bob@example.com"),
    ("carol", "carol@example.com"),
];

#[derive(Args)]
pub struct DemoArgs {
    /// Also attempt a duplicate registration to show the rejection path
    #[arg(long)]
    with_duplicates: bool,
}

pub fn run(args: DemoArgs) -> Result<()> {
    let ledger = Ledger::new();

    println!();
    println!("{}", "userchain demo".bold().cyan());
    println!();

    let info = ledger.info()?;
    println!(
        "Starting with {} block(s), {} user(s)",
        info.total_blocks.to_string().bright_cyan(),
        info.total_users.to_string().bright_cyan()
    );

    println!();
    println!("{}", "Registering users...".bold());
    for (username, email) in SAMPLE_USERS {
        let user = ledger.register(username, email)?;
        println!(
            "{}  {} <{}> id {}",
            "✓".green().bold(),
            user.username.bright_cyan(),
            user.email,
            user.id.as_str().bright_yellow()
        );
    }

    if args.with_duplicates {
        println!();
        println!("{}", "Re-registering alice...".bold());
        match ledger.register("alice", "elsewhere@example.com") {
            Ok(_) => println!("{}  duplicate was accepted", "✗".red().bold()),
            Err(e) => println!("{}  rejected: {}", "✓".green().bold(), e),
        }
    }

    println!();
    println!("{}", "Blocks:".bold().cyan());
    for block in ledger.blocks() {
        let label = match &block.payload {
            Event::Genesis => "genesis".to_string(),
            Event::UserRegistration { user } => format!("registered {}", user.username),
        };
        println!(
            "  {} {} {} {}",
            format!("#{}", block.index).bright_black(),
            block.hash.to_hex()[..16].bright_yellow(),
            format!("parent {}", &block.previous_hash.to_hex()[..16]).bright_black(),
            label
        );
    }

    let info = ledger.info()?;
    println!();
    println!(
        "Total blocks: {}   Total users: {}",
        info.total_blocks.to_string().bright_cyan(),
        info.total_users.to_string().bright_cyan()
    );

    println!();
    if ledger.is_valid() {
        println!("{}  Chain integrity verified", "✓".green().bold());
    } else {
        println!("{}  Chain integrity check failed", "✗".red().bold());
    }
    println!();

    Ok(())
}
