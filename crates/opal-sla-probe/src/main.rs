//! OPAL status line appearance probe.
//!
//! Allocates one native record, writes the requested values into it, reads
//! the record back and prints it as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};
use opal_ffi_bridge::Backend;
use opal_native::{LineAppearanceApi, StatusLineAppearance};
use opal_types::{LineAppearance, LineAppearanceState};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// Round-trip a status line appearance through a native backend
#[derive(Parser, Debug)]
#[command(name = "opal-sla-probe")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Native backend (in-process, linked)
    #[arg(short = 'b', long, default_value = "in-process")]
    backend: Backend,

    /// JSON document with initial values, applied before the flags below
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Line label
    #[arg(long)]
    line: Option<String>,

    /// Line appearance state (idle, trying, proceeding, ringing, connected, ...)
    #[arg(short = 's', long)]
    state: Option<LineAppearanceState>,

    /// Appearance code (negative for undefined)
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    appearance: Option<i32>,

    /// Call identifier
    #[arg(long)]
    call_id: Option<String>,

    /// A party
    #[arg(long)]
    party_a: Option<String>,

    /// B party
    #[arg(long)]
    party_b: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Merges the input document and the individual flags.
    fn values(&self) -> Result<LineAppearance> {
        let mut values = match &self.input {
            Some(path) => load_input(path)?,
            None => LineAppearance::default(),
        };
        if let Some(line) = &self.line {
            values.line = Some(line.clone());
        }
        if let Some(state) = self.state {
            values.state = state;
        }
        if let Some(appearance) = self.appearance {
            values.appearance = appearance;
        }
        if let Some(call_id) = &self.call_id {
            values.call_id = Some(call_id.clone());
        }
        if let Some(party_a) = &self.party_a {
            values.party_a = Some(party_a.clone());
        }
        if let Some(party_b) = &self.party_b {
            values.party_b = Some(party_b.clone());
        }
        Ok(values)
    }
}

fn load_input(path: &Path) -> Result<LineAppearance> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid document in {}", path.display()))
}

/// Writes `values` into a fresh record and returns what the record holds.
fn probe(api: Arc<dyn LineAppearanceApi>, values: &LineAppearance) -> Result<LineAppearance> {
    let sla = StatusLineAppearance::new(api).context("failed to allocate record")?;
    debug!("Probing {:?}", sla);
    sla.apply(values).context("failed to write record")?;
    let snapshot = sla.snapshot().context("failed to read record")?;
    sla.dispose();
    Ok(snapshot)
}

/// One-line summary of a record for the log.
fn describe(sla: &LineAppearance) -> String {
    let appearance = match sla.appearance_index() {
        Some(index) => index.to_string(),
        None => "undefined".to_string(),
    };
    format!(
        "line {} is {}{}, appearance {}",
        sla.line.as_deref().unwrap_or("-"),
        sla.state,
        if sla.state.is_call_active() { " (call active)" } else { "" },
        appearance
    )
}

fn run(args: &Args) -> Result<()> {
    let values = args.values()?;
    let api = args
        .backend
        .open()
        .with_context(|| format!("failed to open {} backend", args.backend))?;
    info!("Using {} backend", args.backend);

    let snapshot = probe(api, &values)?;
    info!("{}", describe(&snapshot));
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
