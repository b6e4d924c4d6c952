//! Member export commands

use anyhow::{anyhow, Context as _};
use serde_json::json;
use wadash_core::ExportPort;

use crate::cli::ExportCommand;
use crate::context::AppContext;
use crate::output::print_json;

pub async fn run(ctx: &AppContext, command: ExportCommand) -> anyhow::Result<()> {
    match command {
        ExportCommand::Csv { group, dir } => {
            let path = ctx
                .api
                .export_group_members_csv(group.as_deref(), &dir)
                .await
                .context("CSV export failed")?;
            if ctx.json {
                print_json(&json!({ "path": path }))
            } else {
                println!("Exported members to {}", path.display());
                Ok(())
            }
        }
        ExportCommand::Sheet { group, tab } => {
            let result = ctx
                .api
                .copy_group_members_to_sheet(group.as_deref(), tab.as_deref())
                .await
                .context("Copy to spreadsheet failed")?;
            if !result.success {
                return Err(anyhow!("{}", result.message));
            }
            if ctx.json {
                return print_json(&result);
            }
            println!("Copied {} row(s) to tab '{}'", result.row_count, result.tab_name);
            if !result.message.is_empty() {
                println!("{}", result.message);
            }
            Ok(())
        }
    }
}
