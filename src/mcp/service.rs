//! MCP service implementation using rmcp.
//!
//! This module defines the EntityService struct with the database tools
//! exposed via the MCP protocol using the rmcp framework's macros. Tool
//! failures never become protocol errors: they are returned as text content
//! flagged with `isError`.

use crate::db::{ConnectionProvider, MssqlConnector};
use crate::error::DbResult;
use crate::tools::{ReadRecordsInput, RecordReader, SchemaIntrospector};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use std::sync::Arc;
use tracing::warn;

/// Map a handler result to the tool response shape.
///
/// Errors become `Error: <message>` with `isError` set. Successes leave
/// `isError` out of the response.
pub fn tool_result(result: DbResult<String>) -> CallToolResult {
    match result {
        Ok(text) => {
            let mut success = CallToolResult::success(vec![Content::text(text)]);
            success.is_error = None;
            success
        }
        Err(e) => {
            warn!(kind = e.kind(), error = %e, "Tool call failed");
            CallToolResult::error(vec![Content::text(format!("Error: {}", e))])
        }
    }
}

#[derive(Clone)]
pub struct EntityService {
    /// Shared connection provider for all database operations
    provider: Arc<ConnectionProvider<MssqlConnector>>,
    /// Database name shown in tool output
    label: String,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl EntityService {
    /// Create a new EntityService instance.
    ///
    /// # Arguments
    ///
    /// * `provider` - Shared connection provider, created once at startup
    /// * `label` - Database name used in the ping text and the schema listing
    pub fn new(
        provider: Arc<ConnectionProvider<MssqlConnector>>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            label: label.into(),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl EntityService {
    #[tool(description = "Placeholder tool to verify the server is running")]
    async fn ping(&self) -> Result<CallToolResult, McpError> {
        Ok(tool_result(Ok(format!("{} MCP Server is running.", self.label))))
    }

    #[tool(
        description = "List all tables (entities) in the database with their columns and types.\nUse this first to discover available tables before querying."
    )]
    async fn describe_entities(&self) -> Result<CallToolResult, McpError> {
        let handler = SchemaIntrospector::new(self.provider.clone(), self.label.clone());
        Ok(tool_result(handler.describe_entities().await))
    }

    #[tool(
        description = "Read records from a table in the database.\nUse describe_entities first to find available tables.\nSupports a column list, one column=value filter, and a row limit (1-1000, default 100)."
    )]
    async fn read_records(
        &self,
        Parameters(input): Parameters<ReadRecordsInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = RecordReader::new(self.provider.clone());
        Ok(tool_result(handler.read_records(input).await))
    }
}

#[tool_handler]
impl ServerHandler for EntityService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mssql-mcp-server".to_owned(),
                title: Some(format!("{} MCP Server", self.label)),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Read-only SQL Server tools.\n\
                \n\
                ## Workflow\n\
                1. Call `describe_entities` to list tables and columns\n\
                2. Call `read_records` with `entity` as `Table` or `schema.Table` (bare names use `dbo`)\n\
                \n\
                ## read_records notes\n\
                - `select`: comma-separated column names; names that are not plain identifiers are skipped\n\
                - `filter`: a single `column=value` equality; other shapes are ignored\n\
                - `limit`: 1-1000, default 100"
                    .to_string(),
            ),
        }
    }
}
