// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! tunables to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[gesture]` - Double-tap zoom, pan clamping and spring parameters
//! - `[prefetch]` - Prefetch window radius and remembered URL capacity
//! - `[retry]` - Backoff policy for gallery and category loads
//! - `[gallery]` - Default gallery query (limit and sorting)
//! - `[viewer]` - Info panel fade and analytics buffering
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `GALLERY_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use gallery_lens::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.prefetch.radius = 3;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "GalleryLens";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "GALLERY_LENS_CONFIG_DIR";

// =============================================================================
// Enums (shared between sections)
// =============================================================================

/// Field the gallery service sorts by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Curated display order.
    #[default]
    Order,
    /// Popularity (view count).
    Views,
    /// Creation time, oldest first when ascending. Pair with
    /// [`SortOrder::Descending`] for the newest items first.
    Recent,
}

impl SortBy {
    /// Wire name expected by the gallery service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Order => "order",
            SortBy::Views => "views",
            SortBy::Recent => "createdAt",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Wire name expected by the gallery service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

// =============================================================================
// Section Structs
// =============================================================================

/// Gesture engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    /// Scale reached by a double-tap from rest.
    pub double_tap_scale: f32,

    /// Keep the zoomed image covering its rest position while panning.
    pub clamp_pan: bool,

    pub spring_damping: f32,

    pub spring_stiffness: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_scale: DOUBLE_TAP_ZOOM_SCALE,
            clamp_pan: true,
            spring_damping: DEFAULT_SPRING_DAMPING,
            spring_stiffness: DEFAULT_SPRING_STIFFNESS,
        }
    }
}

/// Prefetch settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PrefetchSettings {
    pub enabled: bool,

    /// Number of items warmed on each side of the current index.
    pub radius: usize,

    /// Number of already-warmed URLs remembered per session.
    pub memory: usize,
}

impl Default for PrefetchSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: DEFAULT_PREFETCH_RADIUS,
            memory: DEFAULT_PREFETCH_MEMORY,
        }
    }
}

/// Critical load retry settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_FETCH_ATTEMPTS,
            base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
        }
    }
}

/// Default gallery query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GallerySettings {
    pub limit: u32,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_GALLERY_LIMIT,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Viewer presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerSettings {
    pub info_fade_ms: u64,
    pub analytics_channel_capacity: usize,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            info_fade_ms: DEFAULT_INFO_FADE_MS,
            analytics_channel_capacity: DEFAULT_ANALYTICS_CHANNEL_CAPACITY,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub gesture: GestureConfig,

    #[serde(default)]
    pub prefetch: PrefetchSettings,

    #[serde(default)]
    pub retry: RetrySettings,

    #[serde(default)]
    pub gallery: GallerySettings,

    #[serde(default)]
    pub viewer: ViewerSettings,
}

fn get_default_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location, or defaults if absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Saves the configuration to the default location.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads the configuration from `path`. Invalid TOML yields the defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "Invalid settings file, using defaults"
            );
            Ok(Config::default())
        }
    }
}

/// Saves the configuration to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
