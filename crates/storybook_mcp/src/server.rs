//! MCP server implementation.

use crate::tools::ToolRegistry;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// MCP server for storybook generation implementing the rmcp `ServerHandler`.
#[derive(Clone)]
pub struct StorybookRouter {
    name: String,
    version: String,
    tools: ToolRegistry,
}

impl StorybookRouter {
    /// Creates a new router builder.
    pub fn builder() -> StorybookRouterBuilder {
        StorybookRouterBuilder::default()
    }

    /// Usage notes sent to the client during initialization.
    pub fn instructions(&self) -> String {
        format!(
            "Storybook MCP Server v{}\n\n\
            This server turns a prompt into an illustrated children's storybook page: \
            a short story, a matching image, and an HTML preview saved to disk.\n\n\
            Available tools: {}",
            self.version,
            self.tools
                .list()
                .iter()
                .map(|t| t.name().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }

    /// Tool descriptors for every registered tool.
    pub fn tool_list(&self) -> Vec<Tool> {
        self.tools
            .list()
            .iter()
            .map(|tool| {
                let schema = match tool.input_schema() {
                    Value::Object(map) => map,
                    _ => JsonObject::new(),
                };
                Tool::new(
                    tool.name().to_string(),
                    tool.description().to_string(),
                    Arc::new(schema),
                )
            })
            .collect()
    }

    /// Run a tool and shape its result for the protocol.
    ///
    /// Successful results carry the tool's JSON as structured content and its
    /// `message` (or the pretty-printed JSON) as text.
    #[instrument(skip(self, arguments), fields(tool = %tool_name))]
    pub async fn dispatch(
        &self,
        tool_name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        debug!(args = ?arguments, "Tool called");
        let input = Value::Object(arguments.unwrap_or_default());

        match self.tools.execute(tool_name, input).await {
            Ok(result) => {
                info!("Tool executed successfully");
                let text = result
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| {
                        serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string())
                    });
                Ok(CallToolResult {
                    content: vec![Content::text(text)],
                    structured_content: Some(result),
                    is_error: Some(false),
                    meta: None,
                })
            }
            Err(e) => {
                warn!(error = %e, "Tool execution failed");
                Err(ErrorData::from(e))
            }
        }
    }
}

impl ServerHandler for StorybookRouter {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: self.version.clone(),
                ..Implementation::default()
            },
            instructions: Some(self.instructions()),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_list()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.dispatch(&request.name, request.arguments).await
    }
}

/// Builder for the storybook MCP router.
#[derive(Default)]
pub struct StorybookRouterBuilder {
    name: Option<String>,
    version: Option<String>,
    tools: Option<ToolRegistry>,
}

impl StorybookRouterBuilder {
    /// Sets the server name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the server version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the tool registry.
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Builds the router.
    pub fn build(self) -> StorybookRouter {
        StorybookRouter {
            name: self.name.unwrap_or_else(|| "storybook".to_string()),
            version: self
                .version
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            tools: self.tools.unwrap_or_default(),
        }
    }
}
