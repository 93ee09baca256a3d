use std::path::{Path, PathBuf};
use tower_lsp::lsp_types::Url;

pub fn uri_to_path(uri: &Url) -> Option<PathBuf> {
    uri.to_file_path().ok()
}

/// Completion and definition only apply to the designated source-file kind.
pub fn is_python_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "py")
}

/// Lightweight container for document state
pub struct Document {
    pub content: String,
    pub version: i32,
}

impl Document {
    pub fn new(content: String, version: i32) -> Self {
        Self { content, version }
    }

    pub fn line(&self, line: usize) -> Option<&str> {
        self.content.lines().nth(line)
    }
}

pub fn utf16_col_to_byte_col(line_content: &str, utf16_col: usize) -> usize {
    let mut curr_utf16 = 0;
    let mut curr_byte = 0;

    for c in line_content.chars() {
        if curr_utf16 >= utf16_col {
            break;
        }
        curr_utf16 += c.len_utf16();
        curr_byte += c.len_utf8();
    }
    curr_byte
}
