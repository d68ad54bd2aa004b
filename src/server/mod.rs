//! Line-delimited JSON-RPC tool server.
//!
//! One request per line on the reader, one response per line on the writer.
//! Notifications (requests without an `id`) are executed but never answered.
//!
//! Supported methods:
//! - `initialize`: server info and capabilities
//! - `ping`: liveness
//! - `tools/list`: tool names, descriptions and input schemas
//! - `tools/call`: run a tool by name with JSON arguments

pub mod jsonrpc;
pub mod tools;

use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::service::AnalysisService;
use jsonrpc::{Request, Response, RpcError};

/// Protocol revision reported by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "crude-or-rude";

#[derive(Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Tool server over an [`AnalysisService`].
#[derive(Debug, Clone)]
pub struct ToolServer {
    service: AnalysisService,
}

impl ToolServer {
    pub fn new(service: AnalysisService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &AnalysisService {
        &self.service
    }

    /// Serve until the reader hits EOF.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(name = SERVER_NAME, "tool server ready");
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(reply) = self.handle_message(&line).await {
                writer.write_all(reply.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        info!("input closed, shutting down");
        Ok(())
    }

    /// Handle one raw line; `None` when nothing should be written back.
    pub async fn handle_message(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparseable message");
                return encode(Response::failure(
                    Value::Null,
                    RpcError::new(jsonrpc::PARSE_ERROR, format!("parse error: {e}")),
                ));
            }
        };

        let request: Request = match serde_json::from_value(value.clone()) {
            Ok(request) => request,
            Err(e) => {
                let id = value.get("id").cloned()?;
                return encode(Response::failure(
                    id,
                    RpcError::new(jsonrpc::INVALID_REQUEST, format!("invalid request: {e}")),
                ));
            }
        };

        if !request.is_v2() {
            if request.is_notification() {
                return None;
            }
            return encode(Response::failure(
                request.id.unwrap_or_default(),
                RpcError::new(jsonrpc::INVALID_REQUEST, "jsonrpc must be \"2.0\""),
            ));
        }

        let notification = request.is_notification();
        let result = self.dispatch(&request.method, request.params).await;
        if notification {
            return None;
        }
        encode(Response::from_result(request.id.unwrap_or_default(), result))
    }

    #[instrument(skip(self, params))]
    async fn dispatch(&self, method: &str, params: Value) -> std::result::Result<Value, RpcError> {
        debug!("dispatching");
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                }
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({
                "tools": tools::definitions(self.service.max_batch_size())
            })),
            "tools/call" => {
                let params: CallParams = serde_json::from_value(params)
                    .map_err(|e| RpcError::invalid_params(format!("invalid params: {e}")))?;
                let output = tools::call(&self.service, &params.name, params.arguments).await?;
                serde_json::to_value(output)
                    .map_err(|e| RpcError::new(jsonrpc::INTERNAL_ERROR, e.to_string()))
            }
            m if m.starts_with("notifications/") => Ok(Value::Null),
            other => Err(RpcError::new(
                jsonrpc::METHOD_NOT_FOUND,
                format!("method not found: {other}"),
            )),
        }
    }
}

fn encode(response: Response) -> Option<String> {
    match serde_json::to_string(&response) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(error = %e, "failed to encode response");
            None
        }
    }
}
