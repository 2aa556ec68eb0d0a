//! Configuration system using TOML files.
//!
//! The config file is looked up in this order:
//! 1. The path given with `--config`
//! 2. `artwork-config.toml` in the working directory
//! 3. The OS-standard config directory:
//!    - Windows: %APPDATA%\cover-minder\config.toml
//!    - macOS: ~/Library/Application Support/cover-minder/config.toml
//!    - Linux: ~/.config/cover-minder/config.toml
//!
//! Every key is optional at parse time. Each command then asks for the
//! settings it needs ([`Config::library_root`], [`Config::fetch_settings`]),
//! and all missing keys are reported together as one fatal [`ConfigError`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cover::{NormalizeOptions, ResizeMode};
use crate::enrichment::SourceSettings;
use crate::pipeline::FetchPolicy;

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "artwork-config.toml";

/// Default log file name, placed in the config directory
pub const DEFAULT_LOG_FILE: &str = "album-artwork.log";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Library location
    pub paths: PathsConfig,

    /// Normalisation of cover images before embedding
    pub cover_art: CoverArtConfig,

    /// Artwork source selection and resolution policy
    pub settings: SourceFlags,

    /// MusicBrainz identification
    pub musicbrainz: MusicBrainzConfig,

    /// API credentials
    pub credentials: Credentials,

    /// Log output
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the music library (`<artist>/<album>[/CD n]`)
    pub root_music_dir: Option<PathBuf>,
}

/// Cover normalisation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverArtConfig {
    /// Target resolution R; images at or above R×R are resized
    pub temp_res: u32,

    /// "stretch" (exact R×R) or "fit" (keep aspect ratio)
    pub resize_mode: ResizeMode,

    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for CoverArtConfig {
    fn default() -> Self {
        let defaults = NormalizeOptions::default();
        Self {
            temp_res: defaults.target,
            resize_mode: defaults.mode,
            jpeg_quality: defaults.jpeg_quality,
        }
    }
}

/// Source enable flags. All of them are required by `fetch`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFlags {
    /// Enforce `min_res` on downloaded artwork
    pub use_hires: Option<bool>,

    /// Minimum acceptable resolution for downloaded artwork
    pub min_res: Option<u32>,

    /// Keep artwork below `min_res` when nothing better is available
    pub use_fallback: Option<bool>,

    /// Query iTunes (600x600 artwork)
    pub use_hires_priority: Option<bool>,

    /// Query MusicBrainz + Cover Art Archive first
    pub use_musicbrainz: Option<bool>,

    /// Never query Last.fm (low resolution artwork)
    pub no_low_res: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicBrainzConfig {
    /// Contact address sent in the User-Agent, as MusicBrainz requires
    pub useragent_email: Option<String>,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Last.fm API key for album.getinfo lookups
    pub lastfm_api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append-only log file (default: album-artwork.log in the config directory)
    pub file: Option<PathBuf>,
}

/// Everything the `fetch` command needs, fully validated.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub sources: SourceSettings,
    pub policy: FetchPolicy,
}

/// A required key that is absent from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKey {
    pub section: &'static str,
    pub key: &'static str,
}

impl std::fmt::Display for MissingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing '{}' in section [{}]", self.key, self.section)
    }
}

/// Collects missing keys so they can all be reported at once.
#[derive(Default)]
struct Requirements {
    missing: Vec<MissingKey>,
}

impl Requirements {
    fn require<T: Clone>(
        &mut self,
        value: &Option<T>,
        section: &'static str,
        key: &'static str,
    ) -> Option<T> {
        if value.is_none() {
            self.missing.push(MissingKey { section, key });
        }
        value.clone()
    }

    fn finish(self) -> Result<(), ConfigError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Missing(self.missing))
        }
    }
}

impl Config {
    /// The library root, required by `--all` and `--cd`.
    pub fn library_root(&self) -> Result<&Path, ConfigError> {
        self.paths
            .root_music_dir
            .as_deref()
            .ok_or_else(|| {
                ConfigError::Missing(vec![MissingKey {
                    section: "paths",
                    key: "root_music_dir",
                }])
            })
    }

    /// Normalisation options for the embed pipeline.
    pub fn normalize_options(&self) -> Result<NormalizeOptions, ConfigError> {
        let cover = &self.cover_art;
        if cover.temp_res == 0 {
            return Err(ConfigError::invalid("cover_art", "temp_res", "must be greater than 0"));
        }
        if !(1..=100).contains(&cover.jpeg_quality) {
            return Err(ConfigError::invalid(
                "cover_art",
                "jpeg_quality",
                "must be between 1 and 100",
            ));
        }
        Ok(NormalizeOptions {
            target: cover.temp_res,
            mode: cover.resize_mode,
            jpeg_quality: cover.jpeg_quality,
        })
    }

    /// Source and policy settings for the fetch pipeline.
    ///
    /// Every flag, the MusicBrainz contact email and the Last.fm key are
    /// required; all absent keys are listed in one error.
    pub fn fetch_settings(&self) -> Result<FetchSettings, ConfigError> {
        let mut req = Requirements::default();
        let flags = &self.settings;

        let email = req.require(&self.musicbrainz.useragent_email, "musicbrainz", "useragent_email");
        let api_key = req.require(&self.credentials.lastfm_api_key, "credentials", "lastfm_api_key");
        let use_hires = req.require(&flags.use_hires, "settings", "use_hires");
        let min_res = req.require(&flags.min_res, "settings", "min_res");
        let use_fallback = req.require(&flags.use_fallback, "settings", "use_fallback");
        let hires_priority = req.require(&flags.use_hires_priority, "settings", "use_hires_priority");
        let use_musicbrainz = req.require(&flags.use_musicbrainz, "settings", "use_musicbrainz");
        let no_low_res = req.require(&flags.no_low_res, "settings", "no_low_res");
        req.finish()?;

        Ok(FetchSettings {
            sources: SourceSettings {
                use_musicbrainz: use_musicbrainz.unwrap_or_default(),
                use_hires_priority: hires_priority.unwrap_or_default(),
                no_low_res: no_low_res.unwrap_or_default(),
                musicbrainz_email: email.unwrap_or_default(),
                lastfm_api_key: api_key.unwrap_or_default(),
            },
            policy: FetchPolicy {
                use_hires: use_hires.unwrap_or_default(),
                min_res: min_res.unwrap_or_default(),
                use_fallback: use_fallback.unwrap_or_default(),
            },
        })
    }

    /// Where log lines are appended.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging
            .file
            .clone()
            .or_else(|| config_dir().map(|d| d.join(DEFAULT_LOG_FILE)))
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cover-minder"))
}

/// Resolve which config file to use when none is given explicitly.
pub fn config_path() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration.
///
/// An explicit path must exist. Without one, a missing default file yields
/// the default configuration. A file that exists but can't be read or
/// parsed is always an error.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };
    load_from(&path)
}

/// Load and parse a specific config file.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("{}", format_missing(.0))]
    Missing(Vec<MissingKey>),

    #[error("Invalid '{key}' in section [{section}]: {message}")]
    Invalid {
        section: &'static str,
        key: &'static str,
        message: String,
    },
}

impl ConfigError {
    fn invalid(section: &'static str, key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            section,
            key,
            message: message.into(),
        }
    }

    /// Missing keys, if this is a [`ConfigError::Missing`].
    pub fn missing_keys(&self) -> &[MissingKey] {
        match self {
            Self::Missing(keys) => keys,
            _ => &[],
        }
    }
}

fn format_missing(keys: &[MissingKey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Tests
// ============================================================================
