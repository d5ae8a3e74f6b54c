pub mod cleanup;
pub mod init;
pub mod stats;
pub mod today;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure idle threshold and monitor intervals")]
    Init(init::InitArgs),
    #[command(about = "Watch mouse and keyboard input and record activity sessions")]
    Watch(watch::WatchArgs),
    #[command(about = "Show active time per day")]
    Stats(stats::StatsArgs),
    #[command(about = "Show today's sessions and hourly timeline")]
    Today,
    #[command(about = "Remove sessions left unfinished by an interrupted run")]
    Cleanup,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Watch(args) => watch::cmd(args).await,
            Commands::Stats(args) => stats::cmd(args),
            Commands::Today => today::cmd(),
            Commands::Cleanup => cleanup::cmd(),
        }
    }
}
