//! Settings initialization command.
//!
//! Without arguments an interactive wizard asks for every monitor setting.
//! `--threshold` sets the idle threshold directly and keeps the other values.

use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Idle threshold in seconds; skips the interactive wizard
    #[arg(short, long)]
    threshold: Option<u64>,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    let config = match init_args.threshold {
        Some(seconds) => Config::read()?.with_threshold(seconds),
        None => Config::init()?,
    };
    config.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
