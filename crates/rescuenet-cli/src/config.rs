//! CLI-owned configuration: TOML file, env overrides, and path resolution.
//!
//! Core never sees these types -- it receives a resolved `Settings` and a
//! blob-store path from here.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use rescuenet_api::{DEFAULT_GEO_URL, DEFAULT_OVERPASS_URL};
use rescuenet_core::Settings;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config structs ──────────────────────────────────────────────

/// CLI-owned TOML configuration. Core never touches this type.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Operational settings handed to the dispatcher.
    #[serde(default)]
    pub settings: Settings,

    /// Collaborator endpoints.
    #[serde(default)]
    pub endpoints: Endpoints,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Endpoints {
    /// Overpass directory endpoint.
    #[serde(default = "default_directory_url")]
    pub directory: String,

    /// IP geolocation endpoint.
    #[serde(default = "default_geo_url")]
    pub geolocation: String,

    /// Triage advisory endpoint. Unset means severity defaults to MEDIUM
    /// even when auto_triage is on.
    pub triage: Option<String>,

    /// Collaborator request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            directory: default_directory_url(),
            geolocation: default_geo_url(),
            triage: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_directory_url() -> String {
    DEFAULT_OVERPASS_URL.into()
}
fn default_geo_url() -> String {
    DEFAULT_GEO_URL.into()
}
fn default_timeout() -> u64 {
    15
}

impl Endpoints {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ── Path resolution ──────────────────────────────────────────────────

/// Resolve the config file path: `--config` flag, else the platform
/// config dir.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    if let Some(ref path) = global.config {
        return path.clone();
    }
    ProjectDirs::from("org", "rescuenet", "rescuenet")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = home_fallback();
            p.push(".config");
            p.push("rescuenet");
            p.push("config.toml");
            p
        })
}

/// Resolve the data directory for persisted blobs: `--data-dir` flag,
/// else the platform data dir.
pub fn data_dir(global: &GlobalOpts) -> PathBuf {
    if let Some(ref dir) = global.data_dir {
        return dir.clone();
    }
    ProjectDirs::from("org", "rescuenet", "rescuenet")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            let mut p = home_fallback();
            p.push(".local");
            p.push("share");
            p.push("rescuenet");
            p
        })
}

fn home_fallback() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()))
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the full Config from defaults + file + environment.
///
/// Env overrides use a double-underscore separator for nesting, e.g.
/// `RESCUENET_SETTINGS__AUTO_TRIAGE=false`.
pub fn load_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = config_path(global);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("RESCUENET_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints_point_at_public_services() {
        let e = Endpoints::default();
        assert!(e.directory.starts_with("https://"));
        assert!(e.triage.is_none());
        assert_eq!(e.timeout_secs, 15);
    }

    #[test]
    fn toml_round_trips_with_partial_sections() {
        let cfg: Config = toml::from_str(
            r#"
            [settings]
            agency_name = "Metro EMS"
            auto_triage = false

            [endpoints]
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.settings.agency_name, "Metro EMS");
        assert!(!cfg.settings.auto_triage);
        assert_eq!(cfg.endpoints.timeout_secs, 5);
        assert_eq!(cfg.endpoints.geolocation, DEFAULT_GEO_URL);
    }
}
