use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(#[allow(dead_code)] u16, #[allow(dead_code)] u16),
}

/// Listener half of the single-producer handoff. A background thread
/// watches the terminal and feeds the app loop one channel carrying both
/// timing sources: key events as they arrive, and a `Tick` whenever the
/// poll timeout (one frame at the configured fps) lapses with no input.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                if !event::poll(tick_rate).unwrap_or(false) {
                    if tx.send(AppEvent::Tick).is_err() {
                        return;
                    }
                    continue;
                }
                let sent = match event::read() {
                    Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                    Ok(Event::Resize(w, h)) => tx.send(AppEvent::Resize(w, h)),
                    _ => Ok(()),
                };
                if sent.is_err() {
                    // Receiver dropped: the app loop is gone.
                    return;
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }

    /// Block until the next key event, discarding ticks and resizes.
    /// Used while the engine is idle so the loop sleeps instead of
    /// spinning on an unmoving world.
    pub fn wait_for_key(&self) -> anyhow::Result<KeyEvent> {
        loop {
            if let AppEvent::Key(key) = self.next()? {
                return Ok(key);
            }
        }
    }
}
