use crate::DjsetServer;
use crate::util;
use djset_core::lookup;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

/// Resolves the `settings.<word>` token under the cursor to its declaration
/// sites across the owning scope's configured files.
pub async fn definition(
    server: &DjsetServer,
    params: GotoDefinitionParams,
) -> Result<Option<GotoDefinitionResponse>> {
    let uri = params.text_document_position_params.text_document.uri;
    let pos = params.text_document_position_params.position;

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
    let Some(name) = lookup::settings_name_at(line, byte_col) else {
        return Ok(None);
    };

    let Some(scope) = server.engine.scope_for_path(&path) else {
        return Ok(None);
    };
    let definitions = server.engine.find_definitions(&scope, name);
    if definitions.is_empty() {
        return Ok(None);
    }

    let locations: Vec<Location> = definitions
        .into_iter()
        .filter_map(|def| {
            let uri = Url::from_file_path(&def.path).ok()?;
            let position = Position::new(def.line as u32, def.column as u32);
            Some(Location::new(uri, Range::new(position, position)))
        })
        .collect();
    Ok(Some(GotoDefinitionResponse::Array(locations)))
}
