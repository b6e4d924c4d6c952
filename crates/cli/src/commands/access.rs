//! Spreadsheet access commands

use anyhow::Context as _;
use serde_json::json;
use wadash_core::{AccessFlow, Connectivity, SessionPort};
use wadash_domain::AccessGrant;

use crate::cli::AccessCommand;
use crate::context::AppContext;
use crate::output::print_json;

pub async fn run(ctx: &AppContext, command: AccessCommand) -> anyhow::Result<()> {
    let mut flow = AccessFlow::new(ctx.access_port());

    match command {
        AccessCommand::Status => {
            let connected = match ctx.api.current_user().await {
                Ok(user) => Connectivity::from(&user).is_connected(),
                Err(_) => false,
            };
            if !connected {
                if ctx.json {
                    return print_json(&json!({ "connected": false, "grant": null }));
                }
                println!("No WhatsApp account connected; access is managed once connected");
                return Ok(());
            }

            let grant = flow.load(true).await.cloned();
            if ctx.json {
                return print_json(&json!({ "connected": true, "grant": grant }));
            }
            match grant {
                Some(grant) => print_grant(&grant),
                None => println!("Access status unavailable"),
            }
            Ok(())
        }
        AccessCommand::Request { email } => {
            let outcome = flow.request(&email).await.context("Access request failed")?;
            if ctx.json {
                return print_json(&json!({ "message": outcome.message, "grant": outcome.grant }));
            }
            if !outcome.message.is_empty() {
                println!("{}", outcome.message);
            }
            print_grant(&outcome.grant);
            Ok(())
        }
    }
}

fn print_grant(grant: &AccessGrant) {
    match grant {
        AccessGrant::Granted { spreadsheet_url, email, created_at } => {
            println!("Spreadsheet: {spreadsheet_url}");
            println!("Shared with: {email} (since {created_at})");
        }
        AccessGrant::NotGranted => println!("No spreadsheet access yet; request it with an email"),
    }
}
