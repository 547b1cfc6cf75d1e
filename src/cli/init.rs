use serde_json::json;

use crate::cli::Context;
use crate::config::Config;
use crate::db::connection;
use crate::error::TasklistError;
use crate::output;

pub fn run(ctx: &Context) -> Result<i32, TasklistError> {
    let path = connection::init_db(&ctx.data_dir)?;
    if !Config::path(&ctx.data_dir).exists() {
        Config::default().save(&ctx.data_dir)?;
    }
    tracing::info!(path = %path.display(), "initialized");

    if ctx.json {
        output::json::print(&output::json::success(json!({
            "path": path.to_string_lossy()
        })));
    } else {
        println!("Initialized tasklist at {}", path.display());
    }
    Ok(0)
}
