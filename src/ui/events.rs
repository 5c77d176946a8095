use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::{self, DataSource, LoadOutcome};

/// Unified TUI events
#[derive(Debug)]
pub enum TuiEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    DataLoaded(LoadOutcome),
}

/// Channel carrying events produced off the UI loop
pub struct EventManager {
    pub event_sender: mpsc::Sender<TuiEvent>,
    pub event_receiver: mpsc::Receiver<TuiEvent>,
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EventManager {
    /// Create a new event manager
    pub fn new() -> Self {
        let (event_sender, event_receiver) = mpsc::channel::<TuiEvent>(100);
        Self {
            event_sender,
            event_receiver,
        }
    }

    /// Get a clone of the event sender for use in async tasks
    pub fn sender(&self) -> mpsc::Sender<TuiEvent> {
        self.event_sender.clone()
    }

    /// Try to receive an event (non-blocking)
    pub fn try_receive(&mut self) -> Option<TuiEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Receive an event (blocking)
    pub async fn receive(&mut self) -> Option<TuiEvent> {
        self.event_receiver.recv().await
    }

    /// Run the one-shot load in the background. There is no cancellation:
    /// if the receiver is gone when it finishes, the result is dropped.
    pub fn spawn_load(&self, source: Box<dyn DataSource>) -> JoinHandle<()> {
        let sender = self.sender();
        tokio::spawn(async move {
            let outcome = api::load(source.as_ref()).await;
            if sender.send(TuiEvent::DataLoaded(outcome)).await.is_err() {
                debug!("Dashboard closed before the load finished; result discarded");
            }
        })
    }
}

/// Wait up to `timeout` for terminal input and convert it. Key releases and
/// unrelated events yield `None`.
pub fn poll_terminal(timeout: Duration) -> Result<Option<TuiEvent>> {
    if !crossterm::event::poll(timeout)? {
        return Ok(None);
    }

    let event = match crossterm::event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(TuiEvent::Key(key)),
        Event::Mouse(mouse) => Some(TuiEvent::Mouse(mouse)),
        Event::Resize(w, h) => Some(TuiEvent::Resize(w, h)),
        _ => None,
    };
    Ok(event)
}
