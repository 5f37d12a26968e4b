//! JustHydrate MCP Server Implementation
//!
//! Implements the MCP server with all drink tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::repository::DrinkRepository;
use crate::tools::drinks;
use crate::tools::status::StatusTracker;

/// JustHydrate MCP Service
#[derive(Clone)]
pub struct HydrateService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    repository: Arc<dyn DrinkRepository>,
    goal_ml: i64,
    tool_router: ToolRouter<HydrateService>,
}

impl HydrateService {
    pub fn new(database_path: PathBuf, repository: Arc<dyn DrinkRepository>, goal_ml: i64) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path, goal_ml))),
            repository,
            goal_ml,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn not_found(id: i64) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(format!(
        r#"{{"error": "Drink not found", "id": {}}}"#,
        id
    ))]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogDrinkParams {
    /// Drink type: water, juice, tea, coffee, milk, alcohol, softdrink, sweet, sports, or a custom label
    pub drink_type: String,
    /// Volume in millilitres, 0 to 2000 (defaults to the last volume logged for this type)
    pub volume_ml: Option<i64>,
    /// When it was drunk, RFC 3339 (defaults to now)
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogQuickPickParams {
    /// Quick pick name: water, tea, coffee or milk
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDrinkParams {
    /// Drink ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateDrinkParams {
    /// Drink ID
    pub id: i64,
    /// New drink type
    pub drink_type: Option<String>,
    /// New volume in millilitres
    pub volume_ml: Option<i64>,
    /// New timestamp, RFC 3339 (the original is kept if omitted)
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteDrinkParams {
    /// Drink ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DaySummaryParams {
    /// Date (YYYY-MM-DD, local calendar day). Defaults to today.
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HydrationHistoryParams {
    /// First date (YYYY-MM-DD), inclusive
    pub start_date: String,
    /// Last date (YYYY-MM-DD), inclusive
    pub end_date: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl HydrateService {
    // --- Status ---

    #[tool(description = "Get the current status of the JustHydrate service including build info, database status, daily goal, and process information")]
    async fn hydrate_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for logging drinks and how hydration and nutrition are counted. Call this when starting a session or when unsure how to use the drink tools.")]
    fn hydration_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::HYDRATION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(HYDRATION_INSTRUCTIONS)]))
    }

    #[tool(description = "List the known drink types with their hydration factor and sub-options, plus the quick-pick presets")]
    fn list_drink_types(&self) -> Result<CallToolResult, McpError> {
        to_json(&drinks::list_drink_types())
    }

    // --- Drinks ---

    #[tool(description = "Log a drink with its type and volume in ml. Without a volume, the last volume logged for that drink type is reused.")]
    fn log_drink(&self, Parameters(p): Parameters<LogDrinkParams>) -> Result<CallToolResult, McpError> {
        let result = drinks::log_drink(self.repository.as_ref(), &p.drink_type, p.volume_ml, p.timestamp.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Log a quick-pick preset (water 200 ml, tea 150 ml, coffee 100 ml, milk 150 ml) as drunk now")]
    fn log_quick_pick(&self, Parameters(p): Parameters<LogQuickPickParams>) -> Result<CallToolResult, McpError> {
        let result = drinks::log_quick_pick(self.repository.as_ref(), &p.name)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a logged drink with its hydration and nutrition figures")]
    fn get_drink(&self, Parameters(p): Parameters<GetDrinkParams>) -> Result<CallToolResult, McpError> {
        let result = drinks::get_drink(self.repository.as_ref(), p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => to_json(&detail),
            None => not_found(p.id),
        }
    }

    #[tool(description = "Edit a drink's type, volume or timestamp. The original timestamp is kept unless a new one is given.")]
    fn update_drink(&self, Parameters(p): Parameters<UpdateDrinkParams>) -> Result<CallToolResult, McpError> {
        let result = drinks::update_drink(
            self.repository.as_ref(),
            p.id,
            p.drink_type.as_deref(),
            p.volume_ml,
            p.timestamp.as_deref(),
        )
        .map_err(|e| McpError::invalid_params(e, None))?;
        match result {
            Some(detail) => to_json(&detail),
            None => not_found(p.id),
        }
    }

    #[tool(description = "Delete a logged drink")]
    fn delete_drink(&self, Parameters(p): Parameters<DeleteDrinkParams>) -> Result<CallToolResult, McpError> {
        let result = drinks::delete_drink(self.repository.as_ref(), p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Summaries ---

    #[tool(description = "Get a day's drinks (newest first) with per-drink figures and the day's totals: volume, hydration ml, percent of goal, and nutrition")]
    fn day_summary(&self, Parameters(p): Parameters<DaySummaryParams>) -> Result<CallToolResult, McpError> {
        let result = drinks::day_summary(self.repository.as_ref(), p.date.as_deref(), self.goal_ml)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get daily hydration totals for every day in a date range (inclusive, at most 366 days)")]
    fn hydration_history(&self, Parameters(p): Parameters<HydrationHistoryParams>) -> Result<CallToolResult, McpError> {
        let result = drinks::hydration_history(self.repository.as_ref(), &p.start_date, &p.end_date, self.goal_ml)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for HydrateService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "justhydrate".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("JustHydrate".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "JustHydrate - personal hydration tracking. \
                 Call hydration_instructions first if unsure. \
                 Drinks: log_drink/log_quick_pick/get_drink/update_drink/delete_drink. \
                 Summaries: day_summary (one day), hydration_history (date range). \
                 Catalogue: list_drink_types. Status: hydrate_status."
                    .into(),
            ),
        }
    }
}
