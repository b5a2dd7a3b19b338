use anyhow::Context;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::database::{manager::DatabaseManager, migrate};

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::pool()
        .await
        .context("failed to connect to the database")?;

    migrate::apply(&pool)
        .await
        .context("failed to apply schema")?;

    match output_format {
        OutputFormat::Json => {
            println!("{}", json!({ "status": "ok", "message": "Schema applied" }));
        }
        OutputFormat::Text => {
            println!("Schema applied");
        }
    }

    Ok(())
}
