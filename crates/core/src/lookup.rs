//! Pure text analysis behind the completion and definition lookups.
//!
//! Everything here operates on byte columns within a single line (or on a
//! whole file text for declaration search); UTF-16 column mapping is the
//! transport layer's job.

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal prefix that arms completion. Deliberately hard-coded: the source
/// module may be imported under another alias, but only the canonical
/// `settings.` spelling triggers.
pub const COMPLETION_TRIGGER: &str = "settings.";

static SETTINGS_ACCESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"settings\.(\w+)").expect("settings access pattern is valid"));

/// A declaration site inside one settings file: zero-based line, byte column
/// of the name's first character within the trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationSite {
    pub line: usize,
    pub column: usize,
}

/// True when the text immediately before the cursor ends with the literal
/// `settings.` prefix. Case-sensitive, no whitespace tolerance.
pub fn at_completion_trigger(line: &str, byte_col: usize) -> bool {
    line.get(..byte_col)
        .is_some_and(|prefix| prefix.ends_with(COMPLETION_TRIGGER))
}

/// Extracts the `<word>` of a `settings.<word>` token containing the cursor,
/// if any. The cursor counts as inside when it sits on any character of the
/// token or directly after its last one, matching the host editor notion of
/// "word range at position".
pub fn settings_name_at(line: &str, byte_col: usize) -> Option<&str> {
    for found in SETTINGS_ACCESS.captures_iter(line) {
        let token = found.get(0).expect("match group 0 always present");
        if token.start() <= byte_col && byte_col <= token.end() {
            return Some(found.get(1).expect("capture group 1 always present").as_str());
        }
    }
    None
}

/// Scans one file's text for declaration lines of `name`: lines whose trimmed
/// text starts with the name followed by whitespace then `=`. Returns one site
/// per matching line, in line order.
pub fn find_declaration_sites(text: &str, name: &str) -> Vec<DeclarationSite> {
    let mut sites = Vec::new();
    if name.is_empty() {
        return sites;
    }
    for (line_number, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        let Some(rest) = line.strip_prefix(name) else {
            continue;
        };
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) if c.is_whitespace() => {}
            _ => continue,
        }
        if chars.as_str().trim_start().starts_with('=') {
            let column = line.find(name).unwrap_or(0);
            sites.push(DeclarationSite {
                line: line_number,
                column,
            });
        }
    }
    sites
}
