//! Status, watch and QR-wait commands

use futures::future::join;
use serde_json::json;
use tracing::info;
use wadash_core::{
    BannerState, ConnectionGate, Connectivity, QrScanWatcher, QrWaitState, SessionPort,
    SessionService, StatusBanner,
};

use crate::context::AppContext;
use crate::output::print_json;

/// One-shot status: the banner line plus the connection gate.
pub async fn show(ctx: &AppContext) -> anyhow::Result<()> {
    let (session, user) = join(ctx.api.session(), ctx.api.current_user()).await;
    let banner = match &session {
        Ok(state) => BannerState::from(state),
        Err(_) => BannerState::Unreachable,
    };
    let connectivity = match user {
        Ok(user) => Connectivity::from(&user),
        Err(_) => Connectivity::Disconnected,
    };

    if ctx.json {
        return print_json(&json!({
            "banner": banner,
            "connectivity": connectivity,
            "session": session.ok(),
        }));
    }

    println!("Session:    {} [{}]", banner.label(), banner.status_tag());
    println!("Connection: {}", describe_connectivity(&connectivity));
    Ok(())
}

/// Follows both status surfaces until Ctrl-C, printing every change.
pub async fn watch(ctx: &AppContext) -> anyhow::Result<()> {
    let interval = ctx.config.polling.connectivity_interval();
    let gate = ConnectionGate::new();
    let banner = StatusBanner::new();
    let gate_handle = gate.start(ctx.session_port(), interval);
    let banner_handle = banner.start(ctx.session_port(), interval);

    info!(interval_ms = interval.as_millis() as u64, "Watching status, Ctrl-C to stop");

    let mut gate_rx = gate.subscribe();
    let mut banner_rx = banner.subscribe();
    let mut last_banner = None;
    let mut last_gate = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = banner_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = banner_rx.borrow_and_update().clone();
                if last_banner.as_ref() != Some(&state) {
                    emit(ctx, "banner", &state, || {
                        format!("session: {} [{}]", state.label(), state.status_tag())
                    })?;
                    last_banner = Some(state);
                }
            }
            changed = gate_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = gate_rx.borrow_and_update().clone();
                if last_gate.as_ref() != Some(&state) {
                    emit(ctx, "connectivity", &state, || {
                        format!("connection: {}", describe_connectivity(&state))
                    })?;
                    last_gate = Some(state);
                }
            }
        }
    }

    gate_handle.stop().await?;
    banner_handle.stop().await?;
    Ok(())
}

/// Waits until a pending QR code is scanned or the session leaves the
/// scan state.
pub async fn watch_qr(ctx: &AppContext) -> anyhow::Result<()> {
    let session = SessionService::new(ctx.session_port()).load().await;
    let watcher = QrScanWatcher::new();
    let interval = ctx.config.polling.qr_scan_interval();

    let Some(handle) = watcher.watch(&session, ctx.session_port(), interval) else {
        return report_qr(ctx, &watcher.current());
    };

    if !ctx.json {
        println!("Waiting for QR scan (checking every {}s)...", interval.as_secs().max(1));
    }

    // `settled` also sees a state reached before it started waiting
    let outcome = tokio::select! {
        _ = tokio::signal::ctrl_c() => None,
        state = watcher.settled() => Some(state),
    };

    handle.stop().await?;
    match outcome {
        Some(state) => report_qr(ctx, &state),
        None => Ok(()),
    }
}

fn report_qr(ctx: &AppContext, state: &QrWaitState) -> anyhow::Result<()> {
    if ctx.json {
        return print_json(state);
    }
    match state {
        QrWaitState::Waiting => println!("Still waiting for QR scan"),
        QrWaitState::Connected { phone: Some(phone) } => println!("Connected (+{phone})"),
        QrWaitState::Connected { phone: None } => println!("Connected"),
        QrWaitState::Left { status } => {
            println!("Session is not waiting for a scan (status {})", status.as_str());
        }
    }
    Ok(())
}

fn emit<T: serde::Serialize>(
    ctx: &AppContext,
    surface: &str,
    state: &T,
    line: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    if ctx.json {
        let mut event = serde_json::Map::new();
        event.insert(surface.to_string(), serde_json::to_value(state)?);
        println!("{}", serde_json::Value::Object(event));
    } else {
        println!("{}", line());
    }
    Ok(())
}

fn describe_connectivity(state: &Connectivity) -> String {
    match state {
        Connectivity::Checking => "checking".to_string(),
        Connectivity::Connected { phone: Some(phone) } => format!("connected as +{phone}"),
        Connectivity::Connected { phone: None } => "connected".to_string(),
        Connectivity::Disconnected => "no account connected".to_string(),
    }
}
