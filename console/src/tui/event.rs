//! Terminal event loop.
//!
//! [`EventHandler`] runs in its own task and multiplexes three sources with
//! `tokio::select!`: a tick interval (driving the cover-screen countdown
//! and other timers), polled crossterm input, and a shutdown signal. All
//! events are forwarded to the app over an MPSC channel; the app never
//! touches the terminal input directly.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

/// Poll timeout for crossterm input.
const POLL_TIMEOUT_MS: u64 = 10;

/// Events that drive the app loop.
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Periodic tick at the configured interval.
    Tick,
    /// A key press or key combination.
    Key(KeyEvent),
    /// Terminal resize to (columns, rows).
    Resize(u16, u16),
}

/// Generates [`TuiEvent`]s from the terminal and a tick timer.
#[derive(Debug)]
pub struct EventHandler {
    event_tx: mpsc::Sender<TuiEvent>,
    shutdown_rx: oneshot::Receiver<()>,
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a handler sending into `event_tx` until `shutdown_rx`
    /// fires.
    pub fn new(
        event_tx: mpsc::Sender<TuiEvent>,
        shutdown_rx: oneshot::Receiver<()>,
        tick_rate: Duration,
    ) -> Self {
        Self {
            event_tx,
            shutdown_rx,
            tick_rate,
        }
    }

    /// Runs the event loop until shutdown or until the receiver is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the blocking terminal-poll task panics.
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut tick_interval = tokio::time::interval(self.tick_rate);
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Burst);
        // The first tick fires immediately; consume it.
        tick_interval.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = &mut self.shutdown_rx => {
                    debug!("event handler received shutdown signal");
                    break;
                }

                _ = tick_interval.tick() => {
                    if self.event_tx.send(TuiEvent::Tick).await.is_err() {
                        break;
                    }
                }

                // A select cancellation must land in the sleep, before the
                // blocking read starts.
                result = async {
                    tokio::time::sleep(Duration::from_millis(POLL_TIMEOUT_MS)).await;
                    tokio::task::spawn_blocking(|| {
                        poll_terminal_event(Duration::from_millis(POLL_TIMEOUT_MS))
                    }).await
                } => {
                    match result {
                        Ok(Some(event)) => {
                            if self.event_tx.send(event).await.is_err() {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(join_error) => {
                            error!("terminal poll task panicked: {join_error}");
                            return Err(std::io::Error::other("terminal polling task panicked"));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Polls for one terminal event. Poll failures (no terminal attached, as in
/// tests and CI) are treated as "no event".
fn poll_terminal_event(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => match event::read() {
            Ok(CrosstermEvent::Key(key)) => Some(TuiEvent::Key(key)),
            Ok(CrosstermEvent::Resize(cols, rows)) => Some(TuiEvent::Resize(cols, rows)),
            Ok(_) => None,
            Err(_) => None,
        },
        _ => None,
    }
}
