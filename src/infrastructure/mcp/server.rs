//! # MCP Server
//!
//! Exposes the `httpx` tool through rmcp. Payload validation happens here,
//! before the handler (and therefore any process) is reached.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::application::handler::ScanHandler;
use crate::domain::types::{ScanRequest, ToolResponse};
use crate::strings::messages;

#[derive(Clone)]
pub struct HttpxServer {
    handler: ScanHandler,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl HttpxServer {
    pub fn new(handler: ScanHandler) -> Self {
        Self {
            handler,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "httpx",
        description = "Scan target domains and detect active HTTP/HTTPS services using projectdiscovery/httpx."
    )]
    async fn httpx(
        &self,
        Parameters(request): Parameters<ScanRequest>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        check_request(&request)?;
        let response = self.handler.handle(&request, context.ct.clone()).await;
        if let ToolResponse::Error { message } = &response {
            tracing::warn!(command = self.handler.command(), "{}", message);
        }
        Ok(into_call_tool_result(response))
    }
}

#[tool_handler]
impl ServerHandler for HttpxServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(messages::SERVER_INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}

fn check_request(request: &ScanRequest) -> Result<(), McpError> {
    request
        .validate()
        .map_err(|e| McpError::invalid_params(messages::invalid_params(&e.to_string()), None))
}

/// Tool failures travel as `isError` results so the caller sees the message as content.
pub fn into_call_tool_result(response: ToolResponse) -> CallToolResult {
    match response {
        ToolResponse::Ok { text } => CallToolResult::success(vec![Content::text(text)]),
        ToolResponse::Error { message } => CallToolResult::error(vec![Content::text(message)]),
    }
}
