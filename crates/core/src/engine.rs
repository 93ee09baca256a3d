//! The djset engine: per-scope name index, watch set, and lookups.
//!
//! All per-scope state is replaced whole-entry at a time, so readers observe
//! either the previous complete snapshot or the new one, never a mix.

use crate::config::Config;
use crate::index::NameCollector;
use crate::lookup;
use crate::scope::{ProjectScope, ScopeId};
use crate::watcher::{ChangeSignal, WatchSet};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// One resolved declaration site of a settings name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub path: PathBuf,
    /// Zero-based line within the file.
    pub line: usize,
    /// Byte column of the name's first character within the trimmed line.
    pub column: usize,
}

pub struct Engine {
    scopes: DashMap<ScopeId, ProjectScope>,
    config: RwLock<Config>,
    index: DashMap<ScopeId, Arc<Vec<String>>>,
    watchers: DashMap<ScopeId, WatchSet>,
    signals: mpsc::UnboundedSender<ChangeSignal>,
}

impl Engine {
    /// Builds an engine plus the receiving end of its change-signal channel.
    /// The embedder drains the receiver and feeds each signal back into
    /// [`Engine::on_change_signal`].
    pub fn new(config: Config) -> (Arc<Self>, mpsc::UnboundedReceiver<ChangeSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Arc::new(Self {
            scopes: DashMap::new(),
            config: RwLock::new(config),
            index: DashMap::new(),
            watchers: DashMap::new(),
            signals: tx,
        });
        (engine, rx)
    }

    pub fn config(&self) -> Config {
        self.config.read().expect("config lock poisoned").clone()
    }

    /// Registers a project scope, then scans and watches it.
    pub fn add_scope(&self, scope: ProjectScope) {
        info!("scope added: {} at {}", scope.id, scope.root.display());
        let id = scope.id.clone();
        self.scopes.insert(id.clone(), scope);
        self.rebuild(&id);
        self.rewatch(&id);
    }

    /// Drops a scope along with its index entry and watch set.
    pub fn remove_scope(&self, id: &ScopeId) {
        info!("scope removed: {}", id);
        self.scopes.remove(id);
        self.index.remove(id);
        self.watchers.remove(id);
    }

    pub fn scope_ids(&self) -> Vec<ScopeId> {
        self.scopes.iter().map(|entry| entry.key().clone()).collect()
    }

    /// The scope owning `path`, by longest matching root.
    pub fn scope_for_path(&self, path: &Path) -> Option<ScopeId> {
        self.scopes
            .iter()
            .filter(|entry| entry.value().contains(path))
            .max_by_key(|entry| entry.value().root.as_os_str().len())
            .map(|entry| entry.key().clone())
    }

    /// Replaces the configured file list, then rewatches and rebuilds every
    /// known scope, whether or not any file content changed.
    pub fn update_config(&self, config: Config) {
        info!("configuration changed: {} settings file(s)", config.settings_files.len());
        *self.config.write().expect("config lock poisoned") = config;
        for id in self.scope_ids() {
            self.rewatch(&id);
            self.rebuild(&id);
        }
    }

    /// Rescans every configured file of the scope and replaces its index
    /// entry. Missing files are skipped with a warning; if nothing was
    /// readable the previous entry stays in place.
    pub fn rebuild(&self, id: &ScopeId) {
        let Some(scope) = self.scopes.get(id).map(|s| s.value().clone()) else {
            debug!("rebuild skipped, unknown scope: {}", id);
            return;
        };
        let files = self.config().settings_files;
        if files.is_empty() {
            debug!("rebuild skipped, no settings files configured for {}", id);
            return;
        }

        let mut collector = NameCollector::new();
        let mut readable = 0usize;
        for relative in &files {
            let path = scope.resolve(relative);
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    readable += 1;
                    collector.scan(&text);
                }
                Err(e) => {
                    warn!("cannot read settings file {}: {}", path.display(), e);
                }
            }
        }

        if readable == 0 {
            warn!("no settings file readable for {}, keeping previous index", id);
            return;
        }

        let names = collector.into_names();
        info!("indexed {} settings name(s) for {}", names.len(), id);
        self.index.insert(id.clone(), Arc::new(names));
    }

    /// Tears down the scope's watch set and recreates it from the current
    /// configured file list. The old set is dropped before the new one is
    /// created so no file fires twice.
    pub fn rewatch(&self, id: &ScopeId) {
        let Some(scope) = self.scopes.get(id).map(|s| s.value().clone()) else {
            debug!("rewatch skipped, unknown scope: {}", id);
            return;
        };
        self.watchers.remove(id);

        let files: Vec<PathBuf> = self
            .config()
            .settings_files
            .iter()
            .map(|relative| scope.resolve(relative))
            .collect();
        if files.is_empty() {
            debug!("no settings files to watch for {}", id);
            return;
        }

        match WatchSet::new(id.clone(), files, self.signals.clone()) {
            Ok(set) => {
                debug!("watching {} settings file(s) for {}", set.len(), id);
                self.watchers.insert(id.clone(), set);
            }
            Err(e) => warn!("cannot watch settings files for {}: {}", id, e),
        }
    }

    /// Reacts to a change signal from a watch set: full rescan of the scope.
    pub fn on_change_signal(&self, signal: &ChangeSignal) {
        debug!("settings file changed in {}", signal.scope);
        self.rebuild(&signal.scope);
    }

    /// Read-only snapshot of a scope's discovered names. None when the scope
    /// is unknown or was never successfully scanned.
    pub fn names(&self, id: &ScopeId) -> Option<Arc<Vec<String>>> {
        self.index.get(id).map(|entry| entry.value().clone())
    }

    /// True once the scope has an index entry, even an empty one.
    pub fn has_index(&self, id: &ScopeId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of configured files the scope's watch set currently covers.
    pub fn watched_file_count(&self, id: &ScopeId) -> usize {
        self.watchers.get(id).map(|set| set.len()).unwrap_or(0)
    }

    /// Every declaration site of `name` across the scope's configured files,
    /// in file-list order then line order. Unreadable files are skipped with
    /// a warning. Empty when the scope is unknown or nothing matches.
    pub fn find_definitions(&self, id: &ScopeId, name: &str) -> Vec<Definition> {
        let Some(scope) = self.scopes.get(id).map(|s| s.value().clone()) else {
            return Vec::new();
        };
        let mut definitions = Vec::new();
        for relative in &self.config().settings_files {
            let path = scope.resolve(relative);
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("cannot read settings file {}: {}", path.display(), e);
                    continue;
                }
            };
            for site in lookup::find_declaration_sites(&text, name) {
                definitions.push(Definition {
                    path: path.clone(),
                    line: site.line,
                    column: site.column,
                });
            }
        }
        definitions
    }
}

/// Convenience for embedders that manage a single project root.
pub fn single_scope_engine(
    root: impl Into<PathBuf>,
    config: Config,
) -> (Arc<Engine>, ScopeId, mpsc::UnboundedReceiver<ChangeSignal>) {
    let root = root.into();
    let id = ScopeId::new(root.to_string_lossy().into_owned());
    let (engine, rx) = Engine::new(config);
    engine.add_scope(ProjectScope {
        id: id.clone(),
        root,
    });
    (engine, id, rx)
}
