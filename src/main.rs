//! JustHydrate
//!
//! An MCP server for personal hydration tracking.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing::info;
use tracing_subscriber::EnvFilter;

use justhydrate::build_info;
use justhydrate::config::Config;
use justhydrate::db::{self, Database};
use justhydrate::mcp::HydrateService;
use justhydrate::repository::SqliteDrinkRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr; stdout carries the MCP stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("justhydrate=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = Config::from_env()?;
    info!(path = %config.database_path.display(), goal_ml = config.goal_ml, "Loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::new(&config.database_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        info!(version, "Database ready");
        Ok(())
    })?;

    let repository = Arc::new(SqliteDrinkRepository::new(database));
    let service = HydrateService::new(config.database_path.clone(), repository, config.goal_ml);

    info!("Starting MCP server on stdio");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
