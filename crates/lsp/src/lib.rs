pub mod capabilities;
pub mod completion;
pub mod goto;
pub mod util;

use crate::util::Document;
use dashmap::DashMap;
use djset_core::{ChangeSignal, Config, Engine, ProjectScope};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

pub struct DjsetServer {
    client: Client,
    pub engine: Arc<Engine>,
    pub documents: DashMap<Url, Arc<Document>>,
    // Taken by `initialize`, which spawns the drain task once a runtime is
    // guaranteed to be running.
    signals: Mutex<Option<mpsc::UnboundedReceiver<ChangeSignal>>>,
}

impl DjsetServer {
    pub fn new(client: Client) -> Self {
        let (engine, signals) = Engine::new(Config::default());
        Self {
            client,
            engine,
            documents: DashMap::new(),
            signals: Mutex::new(Some(signals)),
        }
    }

    fn spawn_signal_drain(&self) {
        let receiver = self.signals.lock().expect("signal lock poisoned").take();
        if let Some(mut receiver) = receiver {
            let engine = self.engine.clone();
            tokio::spawn(async move {
                while let Some(signal) = receiver.recv().await {
                    engine.on_change_signal(&signal);
                }
            });
        }
    }

    fn offset_at(&self, text: &str, position: Position) -> usize {
        let mut line = 0;
        let mut offset = 0;
        let mut chars = text.chars().peekable();

        while line < position.line as usize {
            if let Some(c) = chars.next() {
                offset += c.len_utf8();
                if c == '\n' {
                    line += 1;
                } else if c == '\r' {
                    if chars.peek() == Some(&'\n') {
                        offset += chars.next().expect("peeked").len_utf8();
                    }
                    line += 1;
                }
            } else {
                return offset;
            }
        }

        let mut utf16_count = 0;
        while utf16_count < position.character as usize {
            if let Some(c) = chars.next() {
                if c == '\n' || c == '\r' {
                    break;
                }
                utf16_count += c.len_utf16();
                offset += c.len_utf8();
            } else {
                break;
            }
        }
        offset
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for DjsetServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(options) = params.initialization_options.as_ref() {
            self.engine.update_config(Config::from_json(options));
        }

        let mut roots: Vec<(String, std::path::PathBuf)> = Vec::new();
        if let Some(folders) = params.workspace_folders.as_ref().filter(|f| !f.is_empty()) {
            for folder in folders {
                if let Ok(path) = folder.uri.to_file_path() {
                    roots.push((folder.uri.to_string(), path));
                }
            }
        } else {
            #[allow(deprecated)]
            if let Some(uri) = params.root_uri.as_ref() {
                if let Ok(path) = uri.to_file_path() {
                    roots.push((uri.to_string(), path));
                }
            }
        }
        tracing::info!("initializing with {} project scope(s)", roots.len());
        for (id, root) in roots {
            self.engine.add_scope(ProjectScope::new(id, root));
        }

        self.spawn_signal_drain();

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "djset".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::LOG, "djset language server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        self.client
            .log_message(
                MessageType::LOG,
                "LSP Event: workspace/didChangeConfiguration",
            )
            .await;
        self.engine.update_config(Config::from_json(&params.settings));
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        for folder in params.event.removed {
            self.engine
                .remove_scope(&djset_core::ScopeId::new(folder.uri.to_string()));
        }
        for folder in params.event.added {
            if let Ok(path) = folder.uri.to_file_path() {
                self.engine
                    .add_scope(ProjectScope::new(folder.uri.to_string(), path));
            }
        }
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let content = params.text_document.text;
        let version = params.text_document.version;
        self.documents
            .insert(uri, Arc::new(Document::new(content, version)));
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        if let Some(mut doc_ref) = self.documents.get_mut(&uri) {
            let doc = doc_ref.value_mut();
            let mut content = doc.content.clone();
            for change in &params.content_changes {
                if let Some(range) = change.range {
                    let start_byte = self.offset_at(&content, range.start);
                    let end_byte = self.offset_at(&content, range.end);
                    content.replace_range(start_byte..end_byte, &change.text);
                } else {
                    content = change.text.clone();
                }
            }
            *doc = Arc::new(Document::new(content, version));
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.remove(&params.text_document.uri);
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: textDocument/completion uri={} pos={}:{}",
                    uri, pos.line, pos.character
                ),
            )
            .await;
        let result = completion::complete(self, params).await;
        match &result {
            Ok(Some(CompletionResponse::Array(items))) => {
                self.client
                    .log_message(
                        MessageType::LOG,
                        format!("LSP Response: {} completion item(s)", items.len()),
                    )
                    .await
            }
            Ok(_) => {
                self.client
                    .log_message(MessageType::LOG, "LSP Response: completion not applicable")
                    .await
            }
            Err(e) => {
                self.client
                    .log_message(MessageType::ERROR, format!("LSP Error: {}", e))
                    .await
            }
        }
        result
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = params.text_document_position_params.position;
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: textDocument/definition uri={} pos={}:{}",
                    uri, pos.line, pos.character
                ),
            )
            .await;
        let result = goto::definition(self, params).await;
        match &result {
            Ok(Some(GotoDefinitionResponse::Array(locations))) => {
                self.client
                    .log_message(
                        MessageType::LOG,
                        format!("LSP Response: found {} location(s)", locations.len()),
                    )
                    .await
            }
            Ok(_) => {
                self.client
                    .log_message(MessageType::LOG, "LSP Response: no definition found")
                    .await
            }
            Err(e) => {
                self.client
                    .log_message(MessageType::ERROR, format!("LSP Error: {}", e))
                    .await
            }
        }
        result
    }
}

pub async fn run_server() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = tower_lsp::LspService::new(DjsetServer::new);
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}
