//! Read-only listings and backend diagnostics

use std::future::Future;

use anyhow::anyhow;
use wadash_core::{DataPort, PageInfo, PagedView, ResourceView};
use wadash_domain::{
    BreakerHealth, Contact, GroupMembersPage, ListQuery, Message, PagedResult, Result,
};

use crate::cli::ListArgs;
use crate::context::AppContext;
use crate::output::{or_dash, print_json, timestamp, Table};

pub async fn messages(ctx: &AppContext, args: ListArgs) -> anyhow::Result<()> {
    let query = list_query(ListQuery::messages(), &args, true);
    let page: PagedResult<Message> =
        fetch_page(query, |query| async move { ctx.api.messages(&query).await }).await?;

    if ctx.json {
        return print_json(&page);
    }

    let mut table = Table::new(["Time", "Group", "Sender", "Message", "Media"]);
    for message in &page.items {
        let sender = if message.sender_name.is_empty() {
            &message.sender_phone
        } else {
            &message.sender_name
        };
        table.row([
            timestamp(&message.timestamp),
            or_dash(message.group_label()),
            or_dash(sender),
            message.preview().to_string(),
            media_label(message),
        ]);
    }
    print_page(&table, &page);

    // Links are printed in full; table cells are clipped
    let links = media_links(&page.items);
    if !links.is_empty() {
        println!("\nMedia:");
        for link in links {
            println!("  {link}");
        }
    }
    Ok(())
}

fn media_label(message: &Message) -> String {
    if !message.has_media {
        return "-".to_string();
    }
    if message.media_type.trim().is_empty() {
        "media".to_string()
    } else {
        message.media_type.clone()
    }
}

fn media_links(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .filter_map(|message| {
            let url = message.media_url()?;
            Some(format!("{} {} {url}", message.id, media_label(message)))
        })
        .collect()
}

pub async fn contacts(ctx: &AppContext, args: ListArgs) -> anyhow::Result<()> {
    let query = list_query(ListQuery::contacts(), &args, false);
    let page: PagedResult<Contact> =
        fetch_page(query, |query| async move { ctx.api.contacts(&query).await }).await?;

    if ctx.json {
        return print_json(&page);
    }

    let mut table = Table::new(["Phone", "Name", "Messages", "Last seen", "Groups"]);
    for contact in &page.items {
        table.row([
            contact.phone.clone(),
            or_dash(contact.display_name()),
            contact.message_count.to_string(),
            timestamp(&contact.last_seen),
            or_dash(&contact.group_names().collect::<Vec<_>>().join(", ")),
        ]);
    }
    print_page(&table, &page);
    Ok(())
}

pub async fn members(ctx: &AppContext, args: ListArgs) -> anyhow::Result<()> {
    let query = list_query(ListQuery::members(), &args, true);
    let members: GroupMembersPage =
        fetch_page(query, |query| async move { ctx.api.group_members(&query).await }).await?;

    if ctx.json {
        return print_json(&members);
    }

    let mut table = Table::new(["Phone", "Name", "Group", "Role"]);
    for member in &members.page.items {
        table.row([
            member.phone.clone(),
            or_dash(&member.name),
            or_dash(&member.group_name),
            member.role.to_string(),
        ]);
    }
    print_page(&table, &members.page);

    if !members.groups_summary.is_empty() {
        println!();
        let mut summary = Table::new(["Group", "Members"]);
        for group in &members.groups_summary {
            let name =
                if group.group_name.is_empty() { &group.group_id } else { &group.group_name };
            summary.row([name.clone(), group.member_count.to_string()]);
        }
        summary.print();
    }
    Ok(())
}

pub async fn stats(ctx: &AppContext) -> anyhow::Result<()> {
    let mut view = ResourceView::new();
    let ticket = view.begin();
    view.complete(ticket, ctx.api.stats().await);

    let Some(stats) = view.data() else {
        let message = view.error().unwrap_or("Failed to load stats");
        return Err(anyhow!("{message} (run `wadash stats` again to retry)"));
    };

    if ctx.json {
        return print_json(stats);
    }

    let mut table = Table::new(["Metric", "Value"]);
    table
        .row(["Messages".to_string(), stats.total_messages.to_string()])
        .row(["Contacts".to_string(), stats.total_contacts.to_string()])
        .row(["Groups".to_string(), stats.total_groups.to_string()])
        .row([
            "Scraping".to_string(),
            stats.filter_mode.describe(stats.active_filter_groups as usize),
        ])
        .row(["Queue waiting".to_string(), stats.queue_depth.to_string()])
        .row(["Queue completed".to_string(), stats.queue_completed.to_string()])
        .row(["Queue failed".to_string(), stats.queue_failed.to_string()]);
    if let Some(ratio) = stats.queue_failure_ratio() {
        table.row(["Failure ratio".to_string(), format!("{:.1}%", ratio * 100.0)]);
    }
    table.print();
    Ok(())
}

pub async fn health(ctx: &AppContext) -> anyhow::Result<()> {
    let report = ctx.api.health().await?;

    if ctx.json {
        return print_json(&report);
    }

    let overall = match report.overall() {
        BreakerHealth::Healthy => "healthy",
        BreakerHealth::Degraded => "degraded",
        BreakerHealth::Failing => "failing",
    };
    println!("Backend: {} ({overall})", report.status.as_deref().unwrap_or("unknown"));

    if !report.circuit_breakers.is_empty() {
        let mut table = Table::new(["Breaker", "State"]);
        for (name, state) in &report.circuit_breakers {
            table.row([name.clone(), state.to_string()]);
        }
        table.print();
    }
    Ok(())
}

/// Query for one list command; `--limit` replaces the list's page size.
fn list_query(base: ListQuery, args: &ListArgs, include_group: bool) -> ListQuery {
    let mut query = match args.limit {
        Some(limit) => ListQuery::new(limit),
        None => base,
    };
    if let Some(search) = args.search.as_deref() {
        query = query.search(search);
    }
    if include_group {
        if let Some(group) = args.group.as_deref() {
            query = query.group(group);
        }
    }
    query.page(args.page)
}

/// Runs a single fetch through a [`PagedView`]; failures surface the
/// user-facing message.
async fn fetch_page<P, F, Fut>(query: ListQuery, fetch: F) -> anyhow::Result<P>
where
    P: PageInfo + Clone,
    F: FnOnce(ListQuery) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    let mut view = PagedView::new(query);
    let (ticket, query) = view.begin();
    view.complete(ticket, fetch(query).await);

    match (view.data(), view.resource().error()) {
        (_, Some(message)) => Err(anyhow!("{message}")),
        (Some(page), None) => Ok(page.clone()),
        (None, None) => Err(anyhow!("No data returned")),
    }
}

fn print_page<T>(table: &Table, page: &PagedResult<T>) {
    if table.is_empty() {
        println!("No results");
        return;
    }
    table.print();
    match page.visible_range() {
        Some((first, last)) => println!(
            "\nShowing {first}-{last} of {} (page {} of {})",
            page.total, page.page, page.page_count
        ),
        None => println!("\nPage {} of {}", page.page, page.page_count),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn message(value: serde_json::Value) -> Message {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn media_column_shows_type_only_for_media_messages() {
        let photo = message(json!({"id": "m1", "has_media": "True", "media_type": "image"}));
        let untyped = message(json!({"id": "m2", "has_media": true}));
        let text = message(json!({"id": "m3", "media_type": "image", "message_text": "hi"}));

        assert_eq!(media_label(&photo), "image");
        assert_eq!(media_label(&untyped), "media");
        assert_eq!(media_label(&text), "-");
    }

    #[test]
    fn media_links_list_first_url_per_message() {
        let messages = vec![
            message(json!({
                "id": "m1",
                "has_media": "TRUE",
                "media_type": "video",
                "media_urls": "https://cdn.example/v.mp4, https://cdn.example/v2.mp4"
            })),
            message(json!({"id": "m2", "message_text": "no media"})),
            message(json!({
                "id": "m3",
                "has_media": "False",
                "media_urls": "https://cdn.example/x"
            })),
        ];

        assert_eq!(media_links(&messages), vec!["m1 video https://cdn.example/v.mp4".to_string()]);
    }
}
