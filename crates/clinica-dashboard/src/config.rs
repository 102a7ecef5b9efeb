use std::path::{Path, PathBuf};

use clinica_progress::adherence::DEFAULT_WEEKLY_BUCKETS;
use clinica_progress::roadmap::Timeframe;
use serde::{Deserialize, Serialize};

/// Schema version written by this build. Raising it means appending a step
/// to [`MIGRATIONS`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Trailing 7-day windows shown in the adherence chart.
    #[serde(default = "default_weekly_buckets")]
    pub weekly_buckets: usize,
    #[serde(default)]
    pub roadmap_timeframe: Timeframe,
    /// Only compare instruments administered within this many days.
    #[serde(default)]
    pub comparison_window_days: Option<u32>,
}

fn default_weekly_buckets() -> usize {
    DEFAULT_WEEKLY_BUCKETS
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            weekly_buckets: DEFAULT_WEEKLY_BUCKETS,
            roadmap_timeframe: Timeframe::default(),
            comparison_window_days: None,
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.clinica.dashboard"))
}

/// Load the user's config. On first run the defaults are written out so
/// they can be edited.
pub fn load_or_default() -> eyre::Result<DashboardConfig> {
    let dir = config_dir()?;
    let path = dir.join("config.json");
    if path.exists() {
        return load_from(&path);
    }

    let config = DashboardConfig::default();
    if let Err(e) = save_to(&dir, &config) {
        tracing::warn!(error = %e, "failed to write default config");
    }
    Ok(config)
}

pub fn load_from(path: &Path) -> eyre::Result<DashboardConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no config found, using defaults");
        return Ok(DashboardConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Older documents may not match the struct yet.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: DashboardConfig = serde_json::from_value(migrated)?;
    tracing::debug!(path = %path.display(), version = config.config_version, "config loaded");
    Ok(config)
}

type Migration = fn(&mut serde_json::Map<String, serde_json::Value>);

/// Upgrade steps, indexed by the version they start from.
const MIGRATIONS: [Migration; CURRENT_VERSION as usize] = [rename_weeks];

fn rename_weeks(obj: &mut serde_json::Map<String, serde_json::Value>) {
    if let Some(weeks) = obj.remove("weeks") {
        obj.entry("weekly_buckets").or_insert(weeks);
    }
}

/// Bring a stored document from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} was written by a newer clinica-dashboard \
             (this build reads up to {CURRENT_VERSION})"
        ));
    }

    let obj = json
        .as_object_mut()
        .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
    for (version, step) in MIGRATIONS.iter().enumerate().skip(from_version as usize) {
        step(obj);
        let to = version as u32 + 1;
        obj.insert("config_version".to_string(), to.into());
        tracing::info!(from = version, to, "config migrated");
    }

    Ok(json)
}

pub fn save_to(dir: &Path, config: &DashboardConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    let stamped = DashboardConfig {
        config_version: CURRENT_VERSION,
        ..config.clone()
    };
    let path = dir.join("config.json");

    // The temp file lives next to the target so `persist` is a same-filesystem
    // rename. tempfile creates it owner-only (0600) on unix.
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut file, &stamped)?;
    file.as_file().sync_all()?;
    file.persist(&path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
