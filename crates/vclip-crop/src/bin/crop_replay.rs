//! Replays a recorded crop editor session and prints every emitted region set.
//!
//! Usage:
//!   crop-replay <script.json> [--debug]
//!   crop-replay --schema

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vclip_crop::{run_script, NormalizedRegionSet, ReplayScript};

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--schema") {
        let schema = schemars::schema_for!(NormalizedRegionSet);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .context("usage: crop-replay <script.json> [--debug] | --schema")?;
    let show_debug = args.iter().any(|a| a == "--debug");

    let script = ReplayScript::load(path).with_context(|| format!("failed to load replay script {path}"))?;
    info!(
        template = %script.template,
        events = script.events.len(),
        "Replaying crop session"
    );

    let outcome = run_script(&script);
    for set in &outcome.emitted {
        println!("{}", serde_json::to_string(set)?);
    }

    if show_debug {
        println!("{}", serde_json::to_string_pretty(&outcome.editor.debug_view())?);
    }

    info!(emitted = outcome.emitted.len(), "Replay complete");
    Ok(())
}

/// Colored output for dev, JSON when `LOG_FORMAT=json`. Logs go to stderr so
/// stdout stays machine-readable.
fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("vclip=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .init();
    }
    Ok(())
}
