//! Removes sessions left open by a run that did not shut down cleanly.

use crate::db::activities::{Activities, ActivityStore};
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let removed = Activities::new()?.delete_open()?;
    msg_success!(Message::UnfinishedActivitiesCleaned(removed));
    Ok(())
}
