//! ved entrypoint.
use std::path::Path;
use std::sync::Once;

use anyhow::Result;
use core_terminal::{CrosstermBackend, TerminalBackend};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod runtime;

use runtime::EditorRuntime;

const LOG_FILE: &str = "ved.log";

/// Log to `./ved.log`, replacing the previous session's file. The returned
/// guard flushes the writer on drop and must outlive the editor.
fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", version = env!("CARGO_PKG_VERSION"), "startup");

    let config = core_config::load_from(None)?;
    let mut backend = CrosstermBackend::new();
    backend.set_title("ved")?;
    let mut guard = backend.enter_guard()?;

    let mut runtime = EditorRuntime::new(config);
    let reason = runtime.run(guard.backend_mut())?;
    drop(guard);

    info!(
        target: "runtime",
        reason = %reason,
        modified = runtime.state().buffer.is_modified(),
        frames = runtime.renderer().frames(),
        "shutdown"
    );
    Ok(())
}
