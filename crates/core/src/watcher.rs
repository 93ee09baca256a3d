//! Change watcher: one WatchSet per project scope, mirroring that scope's
//! configured file list.

use crate::scope::ScopeId;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::error::Result;

/// Fired whenever any configured file of a scope is modified, created or
/// deleted. All three collapse into one signal: the whole scope is rescanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSignal {
    pub scope: ScopeId,
}

/// Active file-watch subscriptions for one scope.
///
/// notify cannot watch a path that does not exist yet, and a configured file
/// may well be absent at watch time (it still must fire on creation). So the
/// watcher registers each configured file's parent directory non-recursively
/// and filters events down to the configured paths. Dropping the set tears
/// every subscription down; drop-then-recreate is how `rewatch` avoids
/// duplicate firing.
pub struct WatchSet {
    // Keep watcher alive
    _watcher: RecommendedWatcher,
    watched: usize,
}

impl WatchSet {
    /// Subscribes to changes of the given absolute file paths, reporting them
    /// on `signals` tagged with `scope`.
    pub fn new(
        scope: ScopeId,
        files: Vec<PathBuf>,
        signals: mpsc::UnboundedSender<ChangeSignal>,
    ) -> Result<Self> {
        // Event paths arrive expressed against the watched directory, so both
        // the watch registrations and the filter targets are built from each
        // parent's canonical path; a symlinked project root would otherwise
        // never match. The file itself may not exist yet, so only the parent
        // is canonicalized.
        let mut targets: HashSet<PathBuf> = HashSet::new();
        let mut parents: HashSet<PathBuf> = HashSet::new();
        for file in &files {
            let (Some(parent), Some(name)) = (file.parent(), file.file_name()) else {
                continue;
            };
            let parent = parent
                .canonicalize()
                .unwrap_or_else(|_| parent.to_path_buf());
            targets.insert(parent.join(name));
            parents.insert(parent);
        }
        let watched = targets.len();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let Ok(event) = res else { return };
                if !is_relevant(&event.kind) {
                    return;
                }
                if event.paths.iter().any(|p| targets.contains(p)) {
                    let _ = signals.send(ChangeSignal {
                        scope: scope.clone(),
                    });
                }
            },
            Config::default(),
        )?;

        for parent in &parents {
            if let Err(e) = watcher.watch(parent, RecursiveMode::NonRecursive) {
                tracing::warn!("cannot watch {}: {}", parent.display(), e);
            }
        }

        Ok(Self {
            _watcher: watcher,
            watched,
        })
    }

    /// Number of configured files this set covers.
    pub fn len(&self) -> usize {
        self.watched
    }

    pub fn is_empty(&self) -> bool {
        self.watched == 0
    }
}

fn is_relevant(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    #[test]
    fn test_relevant_event_kinds() {
        assert!(is_relevant(&EventKind::Create(CreateKind::File)));
        assert!(is_relevant(&EventKind::Modify(ModifyKind::Any)));
        assert!(is_relevant(&EventKind::Remove(RemoveKind::File)));
        assert!(!is_relevant(&EventKind::Access(
            notify::event::AccessKind::Any
        )));
    }

    #[test]
    fn test_watch_set_counts_configured_files() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let set = WatchSet::new(
            ScopeId::new("test"),
            vec![dir.path().join("settings.py"), dir.path().join("local.py")],
            tx,
        )
        .unwrap();
        assert_eq!(set.len(), 2);
    }
}
