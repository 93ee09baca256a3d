use crate::DjsetServer;
use crate::util;
use djset_core::lookup;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

/// Completion fires only when the text before the cursor ends with the
/// literal `settings.` prefix. Unknown scope or never-scanned scope yields
/// None; a scanned-but-empty scope yields an empty list.
pub async fn complete(
    server: &DjsetServer,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    let uri = params.text_document_position.text_document.uri;
    let pos = params.text_document_position.position;

    let Some(path) = util::uri_to_path(&uri) else {
        return Ok(None);
    };
    if !util::is_python_path(&path) {
        return Ok(None);
    }
    let Some(doc) = server.documents.get(&uri) else {
        return Ok(None);
    };
    let Some(line) = doc.line(pos.line as usize) else {
        return Ok(None);
    };
    let byte_col = util::utf16_col_to_byte_col(line, pos.character as usize);
    if !lookup::at_completion_trigger(line, byte_col) {
        return Ok(None);
    }

    let Some(scope) = server.engine.scope_for_path(&path) else {
        return Ok(None);
    };
    let Some(names) = server.engine.names(&scope) else {
        return Ok(None);
    };

    let items = names
        .iter()
        .map(|name| CompletionItem {
            label: name.clone(),
            kind: Some(CompletionItemKind::VARIABLE),
            // Sorts discovered settings ahead of whatever the client merges
            // in from other sources.
            sort_text: Some(format!("000{name}")),
            ..Default::default()
        })
        .collect();
    Ok(Some(CompletionResponse::Array(items)))
}
