//! Session lifecycle commands

use std::path::Path;

use anyhow::Context as _;
use serde_json::json;
use wadash_core::{SessionService, SessionSnapshot};
use wadash_domain::SessionState;

use crate::cli::SessionCommand;
use crate::context::AppContext;
use crate::output::print_json;

pub async fn run(ctx: &AppContext, command: SessionCommand) -> anyhow::Result<()> {
    let service = SessionService::new(ctx.session_port());

    match command {
        SessionCommand::Start { qr_out } => {
            let snapshot = service.start().await.context("Failed to start session")?;
            report_snapshot(ctx, &snapshot, qr_out.as_deref())
        }
        SessionCommand::Restart { qr_out } => {
            let snapshot = service.restart().await.context("Failed to restart session")?;
            report_snapshot(ctx, &snapshot, qr_out.as_deref())
        }
        SessionCommand::Stop => {
            let state = service.stop().await.context("Failed to stop session")?;
            report_state(ctx, &state)
        }
        SessionCommand::Delete => {
            let state = service.delete().await.context("Failed to delete session")?;
            report_state(ctx, &state)
        }
        SessionCommand::Qr { out } => {
            let image = service.qr_code().await.context("QR code not available yet")?;
            write_qr(&out, &image)?;
            if ctx.json {
                print_json(&json!({ "qr_path": out, "bytes": image.len() }))
            } else {
                println!("QR code saved to {}", out.display());
                Ok(())
            }
        }
    }
}

fn report_snapshot(
    ctx: &AppContext,
    snapshot: &SessionSnapshot,
    qr_out: Option<&Path>,
) -> anyhow::Result<()> {
    let saved = match (&snapshot.qr, qr_out) {
        (Some(image), Some(path)) => {
            write_qr(path, image)?;
            Some(path)
        }
        _ => None,
    };

    if ctx.json {
        return print_json(&json!({
            "session": snapshot.state,
            "qr_available": snapshot.qr.is_some(),
            "qr_path": saved,
        }));
    }

    report_state(ctx, &snapshot.state)?;
    match (saved, snapshot.qr.is_some()) {
        (Some(path), _) => println!("QR code saved to {}", path.display()),
        (None, true) => println!("QR code ready: wadash session qr --out qr.png"),
        (None, false) if snapshot.state.status.is_awaiting_scan() => {
            println!("QR code not ready yet, retry with: wadash session qr --out qr.png");
        }
        (None, false) => {}
    }
    Ok(())
}

fn report_state(ctx: &AppContext, state: &SessionState) -> anyhow::Result<()> {
    if ctx.json {
        return print_json(state);
    }
    match state.phone() {
        Some(phone) => println!("Session status: {} (+{phone})", state.status),
        None => println!("Session status: {}", state.status),
    }
    Ok(())
}

fn write_qr(path: &Path, image: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, image)
        .with_context(|| format!("Failed to write QR code to {}", path.display()))
}
