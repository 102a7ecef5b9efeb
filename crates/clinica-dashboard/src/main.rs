use std::env;
use std::path::PathBuf;

use clinica_instruments::InstrumentTable;
use eyre::Result;
use tracing_subscriber::EnvFilter;

mod config;
mod snapshot;

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config = config::load_or_default()?;
    let path = snapshot_path()?;
    let snapshot = snapshot::load(&path)?;

    let table = InstrumentTable::builtin().with_definitions(snapshot.instruments.clone())?;
    let as_of = snapshot.as_of.unwrap_or_else(jiff::Timestamp::now);

    let summary = snapshot::build_summary(&snapshot, &table, &config, as_of);
    tracing::info!(
        instruments = summary.assessments.len(),
        comparisons = summary.comparisons.len(),
        has_plan = summary.adherence.is_some(),
        "dashboard summary built"
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

// Logs go to stderr so stdout carries only the summary document.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if env::var("CLINICA_LOG_FORMAT").is_ok_and(|f| f == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn snapshot_path() -> Result<PathBuf> {
    env::args_os()
        .nth(1)
        .or_else(|| env::var_os("CLINICA_SNAPSHOT"))
        .map(PathBuf::from)
        .ok_or_else(|| eyre::eyre!("usage: clinica-dashboard <snapshot.json> (or set CLINICA_SNAPSHOT)"))
}
