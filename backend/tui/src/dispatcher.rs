//! Command execution.
//!
//! Runs `Command`s as detached tokio tasks and posts their resulting `Msg`
//! back into the screen's channel, so the event loop never waits on the
//! naming service.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::debug;

use handle_core::{NamingClient, NamingError};

use crate::form::{Command, Msg};

/// Cursor blink period.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(530);

pub struct EventDispatcher {
    client: Arc<dyn NamingClient>,
    tx: mpsc::UnboundedSender<Msg>,
}

impl EventDispatcher {
    pub fn new(client: Arc<dyn NamingClient>, tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self { client, tx }
    }

    /// Spawn the task for `command`. Its message is dropped if the screen is gone.
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        let tx = self.tx.clone();
        match command {
            Command::Submit(name) => {
                let client = Arc::clone(&self.client);
                tokio::spawn(async move {
                    let msg = submit(client, name).await;
                    if tx.send(msg).is_err() {
                        debug!("Screen closed before submission finished");
                    }
                })
            }
            Command::Exit => tokio::spawn(async move {
                let _ = tx.send(exit().await);
            }),
        }
    }
}

/// Ask the naming service for `name`. One attempt, no retries.
pub async fn submit(client: Arc<dyn NamingClient>, name: String) -> Msg {
    debug!(client = client.name(), name = %name, "Calling naming service");
    let call = tokio::spawn(async move { client.set_name(&name).await });
    match call.await {
        Ok(Ok(name)) => Msg::NameSet(name),
        Ok(Err(err)) => Msg::SubmitFailed(err),
        Err(join_err) => Msg::SubmitFailed(NamingError::Assertion(format!(
            "submission task failed: {}",
            join_err
        ))),
    }
}

pub async fn exit() -> Msg {
    Msg::Exit
}

/// Tick source for `Msg::Blink`.
pub fn blink(period: Duration) -> Interval {
    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticks
}
