use djset_core::engine::single_scope_engine;
use djset_core::{ChangeSignal, Config, Engine, ScopeId};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

/// Materializes a project on disk and spins up an engine with one scope over
/// it. `files` are (relative path, content) pairs; `configured` is the
/// settings-file list handed to the engine.
#[allow(dead_code)]
pub fn setup_project(
    files: &[(&str, &str)],
    configured: &[&str],
) -> (
    TempDir,
    Arc<Engine>,
    ScopeId,
    UnboundedReceiver<ChangeSignal>,
) {
    let dir = tempfile::tempdir().unwrap();
    for (relative, content) in files {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
    }
    let config = Config {
        settings_files: configured.iter().map(|s| s.to_string()).collect(),
    };
    let (engine, id, rx) = single_scope_engine(dir.path(), config);
    (dir, engine, id, rx)
}

#[allow(dead_code)]
pub fn names_of(engine: &Engine, id: &ScopeId) -> Option<Vec<String>> {
    engine.names(id).map(|names| names.as_ref().clone())
}

/// Polls the change-signal channel until something arrives or the deadline
/// passes. The watcher callback runs on the notify thread, so tests have to
/// wait out the OS event latency.
#[allow(dead_code)]
pub fn wait_for_signal(
    rx: &mut UnboundedReceiver<ChangeSignal>,
    timeout: std::time::Duration,
) -> Option<ChangeSignal> {
    let deadline = std::time::Instant::now() + timeout;
    loop {
        match rx.try_recv() {
            Ok(signal) => return Some(signal),
            Err(_) => {
                if std::time::Instant::now() >= deadline {
                    return None;
                }
                std::thread::sleep(std::time::Duration::from_millis(25));
            }
        }
    }
}
