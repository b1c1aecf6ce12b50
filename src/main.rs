mod bing;
mod commands;
mod error;
mod platform;
mod resolution;
mod setter;
mod store;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::*;

/// Fetch the Bing image of the day and set it as the desktop wallpaper
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// How many days to go back, today being 0 (clamped to 0..=7)
    #[arg(
        short = 'n',
        long = "ndays",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    ndays: i64,

    /// Print the selected image's metadata record as JSON on stdout
    #[arg(short, long)]
    metadata: bool,

    /// Download the image again even when it is already cached
    #[arg(short, long)]
    force: bool,

    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "bingwall", &mut std::io::stdout());
        return;
    }

    // The service keeps about a week of history; the cache layer clamps a
    // second time against whatever the archive actually holds.
    let days_ago = cli.ndays.clamp(0, 7) as usize;

    if let Err(e) = commands::run(days_ago, cli.metadata, cli.force, cli.debug).await {
        eprintln!("{} {:#}", "Error:".red(), e);
        std::process::exit(1);
    }
}
