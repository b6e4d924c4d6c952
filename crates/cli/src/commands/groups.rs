//! Allowlist commands

use anyhow::{anyhow, Context as _};
use serde_json::json;
use wadash_core::{AllowlistPort, DiscoveryFlow, EntryStatus};
use wadash_domain::{FilterGroup, FilterGroupList};

use crate::cli::GroupsCommand;
use crate::context::AppContext;
use crate::output::{or_dash, print_json, timestamp, Table};

pub async fn run(ctx: &AppContext, command: GroupsCommand) -> anyhow::Result<()> {
    match command {
        GroupsCommand::List => list(ctx).await,
        GroupsCommand::Add { group_id, name, notes } => {
            let ack = ctx
                .api
                .add_filter_group(group_id.trim(), name.trim(), notes.trim())
                .await
                .context("Failed to add group")?;
            if !ack.success {
                return Err(anyhow!("{}", or_message(&ack.message, "Backend rejected the group")));
            }
            acknowledge(ctx, &ack.message, &format!("Added {group_id} to the allowlist"))
        }
        GroupsCommand::Remove { group_id } => {
            let ack =
                ctx.api.remove_filter_group(&group_id).await.context("Failed to remove group")?;
            if !ack.success {
                return Err(anyhow!("{}", or_message(&ack.message, "Backend refused the removal")));
            }
            acknowledge(ctx, &ack.message, &format!("Removed {group_id} from the allowlist"))
        }
        GroupsCommand::Discover { filter, add } => discover(ctx, filter, add).await,
    }
}

async fn list(ctx: &AppContext) -> anyhow::Result<()> {
    let list = ctx.api.filter_groups().await.context("Failed to load allowlist")?;
    if ctx.json {
        return print_json(&list);
    }

    println!("{}", list.filter_mode.describe(list.groups.len()));
    print_allowlist(&list.groups);
    Ok(())
}

async fn discover(
    ctx: &AppContext,
    filter: Option<String>,
    add: Vec<String>,
) -> anyhow::Result<()> {
    let allowlist: FilterGroupList =
        ctx.api.filter_groups().await.context("Failed to load allowlist")?;
    let mut flow = DiscoveryFlow::new(&allowlist);

    flow.discover(&*ctx.api).await.context("Group discovery failed")?;

    for group_id in &add {
        flow.add(&*ctx.api, group_id)
            .await
            .with_context(|| format!("Failed to add {group_id}"))?;
        if !ctx.json {
            println!("Added {group_id} to the allowlist");
        }
        let refreshed = ctx.api.filter_groups().await.context("Failed to reload allowlist")?;
        flow.sync_allowlist(&refreshed);
        flow.acknowledge_sync();
    }

    if let Some(filter) = filter.as_deref() {
        flow.set_filter(filter);
    }
    let entries = flow.visible();

    if ctx.json {
        return print_json(&json!({ "state": flow.state(), "groups": entries }));
    }

    if entries.is_empty() {
        println!("No groups found");
        return Ok(());
    }

    let mut table = Table::new(["Group id", "Name", "Participants", "Status"]);
    for entry in &entries {
        let status = match entry.status {
            EntryStatus::Available => "available",
            EntryStatus::Syncing => "syncing",
            EntryStatus::Added => "added",
        };
        table.row([
            entry.group.group_id.clone(),
            or_dash(&entry.group.group_name),
            entry.group.participant_count.to_string(),
            status.to_string(),
        ]);
    }
    table.print();
    println!("\n{} of {} group(s) shown", entries.len(), flow.discovered().len());
    Ok(())
}

fn print_allowlist(groups: &[FilterGroup]) {
    if groups.is_empty() {
        println!("Allowlist is empty");
        return;
    }
    let mut table = Table::new(["Group id", "Name", "Active", "Added", "Notes"]);
    for group in groups {
        table.row([
            group.group_id.clone(),
            or_dash(&group.group_name),
            if group.is_active { "yes" } else { "no" }.to_string(),
            timestamp(&group.added_at),
            or_dash(&group.notes),
        ]);
    }
    table.print();
}

fn acknowledge(ctx: &AppContext, message: &str, fallback: &str) -> anyhow::Result<()> {
    if ctx.json {
        return print_json(&json!({ "success": true, "message": message }));
    }
    println!("{}", or_message(message, fallback));
    Ok(())
}

fn or_message<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.trim().is_empty() {
        fallback
    } else {
        message
    }
}
