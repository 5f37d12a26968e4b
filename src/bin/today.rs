//! Print today's hydration summary as JSON

use justhydrate::config::Config;
use justhydrate::db::{migrations, Database};
use justhydrate::repository::SqliteDrinkRepository;
use justhydrate::tools::drinks;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = Database::new(&config.database_path)?;
    database.with_conn(migrations::run_migrations)?;

    let repository = SqliteDrinkRepository::new(database);
    let date = std::env::args().nth(1);
    let summary = drinks::day_summary(&repository, date.as_deref(), config.goal_ml)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
