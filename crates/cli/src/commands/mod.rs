//! Command handlers - one module per command group

mod access;
mod data;
mod export;
mod groups;
mod session;
mod status;

use crate::cli::Command;
use crate::context::AppContext;

/// Runs one parsed command against the backend.
pub async fn dispatch(ctx: &AppContext, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Status => status::show(ctx).await,
        Command::Watch { qr: false } => status::watch(ctx).await,
        Command::Watch { qr: true } => status::watch_qr(ctx).await,
        Command::Session(cmd) => session::run(ctx, cmd).await,
        Command::Messages(args) => data::messages(ctx, args).await,
        Command::Contacts(args) => data::contacts(ctx, args).await,
        Command::Members(args) => data::members(ctx, args).await,
        Command::Stats => data::stats(ctx).await,
        Command::Health => data::health(ctx).await,
        Command::Groups(cmd) => groups::run(ctx, cmd).await,
        Command::Export(cmd) => export::run(ctx, cmd).await,
        Command::Access(cmd) => access::run(ctx, cmd).await,
    }
}
