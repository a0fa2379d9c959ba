use crate::biometric::{BiometricProvider, SimulatedSensor};
use crate::config::{ConfigStore, PinStore};
use crate::lock::{LockController, ScenePhase};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::{handle_key, InputAction};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

pub fn run(config: ConfigStore, runtime: Handle) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = Duration::from_millis(100);
    let events = EventHandler::new(tick_rate);

    let provider: Arc<dyn BiometricProvider> =
        Arc::new(SimulatedSensor::from_config(&config.get().biometric));
    let store: Arc<dyn PinStore> = Arc::new(config.clone());
    let lock = LockController::new(store, provider, runtime, events.completion_sink());
    let mut app = App::new(config, lock);
    tracing::info!(locked = app.is_locked(), "UI started");

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => match handle_key(&mut app, key) {
                InputAction::None => {}
                InputAction::Suspend => suspend(&mut app, &mut terminal)?,
            },
            Ok(AppEvent::Tick) => app.on_tick(),
            Ok(AppEvent::Lifecycle(scene)) => app.on_lifecycle(scene),
            Ok(AppEvent::Biometric(completion)) => app.on_biometric(completion),
            Ok(AppEvent::Shutdown) => {
                tracing::info!("Shutdown signal received");
                app.request_quit();
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    Ok(())
}

/// Background the app for the duration of a job-control stop.
///
/// The lock sees `Background` before the terminal is released, so the
/// content is already covered when the user comes back.
#[cfg(unix)]
fn suspend(app: &mut App, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    use crate::ui::terminal_guard::{resume_terminal, suspend_terminal};

    app.on_lifecycle(ScenePhase::Background);
    terminal.draw(|frame| draw(frame, app))?;

    suspend_terminal()?;
    {
        let _resume = scopeguard::guard((), |()| {
            if let Err(err) = resume_terminal() {
                tracing::error!(error = %err, "Failed to restore terminal after suspend");
            }
        });
        tracing::debug!("Suspending");
        // SAFETY: raise only delivers a signal to the current process.
        if unsafe { libc::raise(libc::SIGTSTP) } != 0 {
            tracing::warn!(error = %io::Error::last_os_error(), "Failed to suspend");
        }
    }

    terminal.clear()?;
    app.on_lifecycle(ScenePhase::Active);
    Ok(())
}

#[cfg(not(unix))]
fn suspend(app: &mut App, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    app.on_lifecycle(ScenePhase::Background);
    terminal.draw(|frame| draw(frame, app))?;
    app.on_lifecycle(ScenePhase::Active);
    Ok(())
}
