//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//! Every setting has a default, so configuration is optional end to end:
//! with no `MIQAT_*` variables set and no config file present, the loader
//! returns the default configuration.
//!
//! ## Loading Strategy
//! 1. If any `MIQAT_*` environment variable is set, the environment layer
//!    wins: the variables overlay the defaults, and invalid values are
//!    hard errors (no silent fallback)
//! 2. Otherwise, probes multiple paths for a config file
//! 3. Otherwise, returns the defaults
//! 4. Files support JSON and TOML formats
//!
//! ## Environment Variables
//! - `MIQAT_QIYAM_BLOCK_MINS`: Qiyam block duration in minutes
//! - `MIQAT_FAJR_BLOCK_MINS`: Fajr block duration in minutes
//! - `MIQAT_MAGHRIB_BLOCK_MINS`: Maghrib block duration in minutes
//! - `MIQAT_DEFAULT_BLOCK_MINS`: Dhuhr/Asr/Isha block duration in minutes
//! - `MIQAT_MIN_INTERSTITIAL_GAP_MINS`: Gap absorption threshold in minutes
//! - `MIQAT_TRIM_OVERLAPS`: Clamp prayer blocks at the next prayer's start
//! - `MIQAT_TICK_INTERVAL_MS`: Day-cycle tick period in milliseconds
//! - `MIQAT_TIMEZONE`: IANA timezone the clock is evaluated in
//! - `MIQAT_FAJR_TIME` .. `MIQAT_ISHA_TIME`, `MIQAT_QIYAM_TIME`: Fixed
//!   schedule clock times (`HH:MM`)
//! - `MIQAT_DERIVE_QIYAM`: Derive qiyam as the last third of the night
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./miqat.json` or `./miqat.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveTime;
use chrono_tz::Tz;
use miqat_domain::{Config, MiqatError, Result};

/// Environment variables the loader recognizes, in documentation order
const ENV_VARS: [&str; 15] = [
    "MIQAT_QIYAM_BLOCK_MINS",
    "MIQAT_FAJR_BLOCK_MINS",
    "MIQAT_MAGHRIB_BLOCK_MINS",
    "MIQAT_DEFAULT_BLOCK_MINS",
    "MIQAT_MIN_INTERSTITIAL_GAP_MINS",
    "MIQAT_TRIM_OVERLAPS",
    "MIQAT_TICK_INTERVAL_MS",
    "MIQAT_TIMEZONE",
    "MIQAT_FAJR_TIME",
    "MIQAT_DHUHR_TIME",
    "MIQAT_ASR_TIME",
    "MIQAT_MAGHRIB_TIME",
    "MIQAT_ISHA_TIME",
    "MIQAT_QIYAM_TIME",
    "MIQAT_DERIVE_QIYAM",
];

/// Load configuration with automatic fallback strategy
///
/// Environment variables take precedence over config files; with neither
/// present the defaults stand.
///
/// # Errors
/// Returns `MiqatError::Config` if:
/// - An environment variable carries an invalid value
/// - A probed config file has an invalid format
pub fn load() -> Result<Config> {
    if ENV_VARS.iter().any(|key| std::env::var_os(key).is_some()) {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    if let Some(path) = probe_config_paths() {
        return load_from_file(Some(path));
    }

    tracing::debug!("No configuration provided; using defaults");
    Ok(Config::default())
}

/// Load configuration from environment variables
///
/// Variables overlay the default configuration; unset variables keep
/// their defaults.
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `MiqatError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    if let Some(mins) = env_parse::<i64>("MIQAT_QIYAM_BLOCK_MINS")? {
        config.blocks.qiyam_block_mins = mins;
    }
    if let Some(mins) = env_parse::<i64>("MIQAT_FAJR_BLOCK_MINS")? {
        config.blocks.fajr_block_mins = mins;
    }
    if let Some(mins) = env_parse::<i64>("MIQAT_MAGHRIB_BLOCK_MINS")? {
        config.blocks.maghrib_block_mins = mins;
    }
    if let Some(mins) = env_parse::<i64>("MIQAT_DEFAULT_BLOCK_MINS")? {
        config.blocks.default_block_mins = mins;
    }
    if let Some(mins) = env_parse::<i64>("MIQAT_MIN_INTERSTITIAL_GAP_MINS")? {
        config.blocks.min_interstitial_gap_mins = mins;
    }
    config.blocks.trim_overlaps = env_bool("MIQAT_TRIM_OVERLAPS", config.blocks.trim_overlaps);

    if let Some(period) = env_parse::<u64>("MIQAT_TICK_INTERVAL_MS")? {
        config.clock.tick_interval_ms = period;
    }
    if let Some(value) = std::env::var_os("MIQAT_TIMEZONE") {
        let value = value.to_string_lossy();
        config.clock.timezone = Tz::from_str(&value)
            .map_err(|e| MiqatError::Config(format!("Invalid timezone: {}", e)))?;
    }

    if let Some(time) = env_time("MIQAT_FAJR_TIME")? {
        config.schedule.fajr = time;
    }
    if let Some(time) = env_time("MIQAT_DHUHR_TIME")? {
        config.schedule.dhuhr = time;
    }
    if let Some(time) = env_time("MIQAT_ASR_TIME")? {
        config.schedule.asr = time;
    }
    if let Some(time) = env_time("MIQAT_MAGHRIB_TIME")? {
        config.schedule.maghrib = time;
    }
    if let Some(time) = env_time("MIQAT_ISHA_TIME")? {
        config.schedule.isha = time;
    }
    if let Some(time) = env_time("MIQAT_QIYAM_TIME")? {
        config.schedule.qiyam = Some(time);
    }
    config.schedule.derive_qiyam = env_bool("MIQAT_DERIVE_QIYAM", config.schedule.derive_qiyam);

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `MiqatError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MiqatError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MiqatError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MiqatError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MiqatError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MiqatError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(MiqatError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./miqat.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("miqat.json"),
            cwd.join("miqat.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("miqat.json"),
                exe_dir.join("miqat.toml"),
                exe_dir.join("../config.json"),
                exe_dir.join("../config.toml"),
                exe_dir.join("../../config.json"),
                exe_dir.join("../../config.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// Parse an optional environment variable
///
/// # Errors
/// Returns `MiqatError::Config` when the variable is set but unparsable.
fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| MiqatError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

/// Parse an optional `HH:MM` clock time from an environment variable
fn env_time(key: &str) -> Result<Option<NaiveTime>> {
    match std::env::var(key) {
        Ok(value) => NaiveTime::parse_from_str(&value, "%H:%M")
            .map(Some)
            .map_err(|e| MiqatError::Config(format!("Invalid time for {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Arguments
/// * `key` - Environment variable name
/// * `default` - Default value if variable is not set
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
