use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use signal_hook::consts::{SIGINT, SIGTERM};

use crate::lock::{BiometricCompletion, CompletionSink, ScenePhase};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    /// Terminal focus changed (focus reporting).
    Lifecycle(ScenePhase),
    /// A biometric ceremony finished on the runtime.
    Biometric(BiometricCompletion),
    /// OS signal received (SIGTERM, SIGINT)
    Shutdown,
}

pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            let shutdown = Arc::new(AtomicBool::new(false));
            for signal in [SIGINT, SIGTERM] {
                if let Err(err) = signal_hook::flag::register(signal, Arc::clone(&shutdown)) {
                    tracing::warn!(signal, error = %err, "Failed to register signal handler");
                }
            }

            let mut last_tick = Instant::now();
            loop {
                if shutdown.swap(false, Ordering::Relaxed) {
                    let _ = event_tx.send(AppEvent::Shutdown);
                }

                // Short poll timeout so signals are noticed promptly
                let timeout =
                    tick_rate.saturating_sub(last_tick.elapsed()).min(Duration::from_millis(50));

                let forwarded = match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(event) => match translate(event) {
                            Some(app_event) => event_tx.send(app_event).is_ok(),
                            None => true,
                        },
                        Err(err) => {
                            tracing::error!(error = %err, "Terminal event read failed");
                            break;
                        }
                    },
                    Ok(false) => true,
                    Err(err) => {
                        tracing::error!(error = %err, "Terminal event poll failed");
                        break;
                    }
                };
                if !forwarded {
                    break;
                }

                if last_tick.elapsed() >= tick_rate {
                    if event_tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx, tx }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Sink that posts finished biometric ceremonies back to the UI thread.
    pub fn completion_sink(&self) -> CompletionSink {
        let tx = self.tx.clone();
        Arc::new(move |completion| {
            if tx.send(AppEvent::Biometric(completion)).is_err() {
                tracing::trace!("Biometric result dropped (event loop gone)");
            }
        })
    }
}

/// Map a terminal event to an app event. Focus loss is the terminal's
/// equivalent of the app becoming inactive.
fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) => Some(AppEvent::Key(key)),
        Event::FocusGained => Some(AppEvent::Lifecycle(ScenePhase::Active)),
        Event::FocusLost => Some(AppEvent::Lifecycle(ScenePhase::Inactive)),
        _ => None,
    }
}
