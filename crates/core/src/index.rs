//! Name index builder: extracts top-level assignment targets from settings
//! file text.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a declaration line: optional leading whitespace, the name, optional
/// whitespace, `=`. Anchored to line starts via multiline mode.
static DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(\w+)\s*=").expect("declaration pattern is valid"));

/// Accumulates declared names across one or more file texts, collapsing
/// duplicates while preserving first-seen order.
#[derive(Debug, Default)]
pub struct NameCollector {
    names: IndexSet<String>,
}

impl NameCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans one file's full text and records every declared name.
    pub fn scan(&mut self, text: &str) {
        for capture in DECLARATION.captures_iter(text) {
            self.names.insert(capture[1].to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Consumes the collector, yielding the ordered, duplicate-free list.
    pub fn into_names(self) -> Vec<String> {
        self.names.into_iter().collect()
    }
}
