//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.marvin/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The API credential is resolved here and handed to the provider at
//! construction; nothing below this layer reads the environment.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::reveal::RevealTimings;
use crate::scope::GenerationParams;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MarvinConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub groq: GroqConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub model: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GroqConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GenerationConfig {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
    pub presence_penalty: Option<f32>,
    pub frequency_penalty: Option<f32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PacingConfig {
    pub thinking_floor_ms: Option<u64>,
    pub reveal_stagger_ms: Option<u64>,
    pub type_interval_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "llama3-groq-70b-8192-tool-use-preview";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// Artificial minimum "thinking" duration awaited in parallel with the request.
pub const DEFAULT_THINKING_FLOOR_MS: u64 = 5000;
pub const DEFAULT_REVEAL_STAGGER_MS: u64 = 1000;
pub const DEFAULT_TYPE_INTERVAL_MS: u64 = 20;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub params: GenerationParams,
    pub thinking_floor: Duration,
    pub timings: RevealTimings,
}

/// CLI flag values (None / false = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Disables the UX pacing floor so results show as soon as they arrive.
    pub instant: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.marvin/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".marvin").join("config.toml"))
}

/// Load config from `~/.marvin/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MarvinConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MarvinConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MarvinConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MarvinConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: MarvinConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Marvin Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# model = "llama3-groq-70b-8192-tool-use-preview"

# [groq]
# api_key = "gsk_..."                # Or set GROQ_API_KEY env var
# base_url = "https://api.groq.com/openai/v1"

# [generation]
# temperature = 0.3
# top_p = 0.85
# max_tokens = 2048
# presence_penalty = 0.1
# frequency_penalty = 0.3

# [pacing]
# thinking_floor_ms = 5000           # Minimum "thinking" duration; 0 disables
# reveal_stagger_ms = 1000           # Delay between cards appearing
# type_interval_ms = 20              # Delay between typed characters
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MarvinConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Model: CLI → env → config → default
    let model = cli
        .model
        .clone()
        .or_else(|| std::env::var("MARVIN_MODEL").ok())
        .or_else(|| config.general.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // API key: env → config
    let api_key = std::env::var("GROQ_API_KEY")
        .ok()
        .or_else(|| config.groq.api_key.clone());

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("GROQ_BASE_URL").ok())
        .or_else(|| config.groq.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string());

    let defaults = GenerationParams::default();
    let params = GenerationParams {
        temperature: config.generation.temperature.unwrap_or(defaults.temperature),
        top_p: config.generation.top_p.unwrap_or(defaults.top_p),
        max_tokens: config.generation.max_tokens.unwrap_or(defaults.max_tokens),
        presence_penalty: config
            .generation
            .presence_penalty
            .unwrap_or(defaults.presence_penalty),
        frequency_penalty: config
            .generation
            .frequency_penalty
            .unwrap_or(defaults.frequency_penalty),
    };

    let thinking_floor = if cli.instant {
        Duration::ZERO
    } else {
        Duration::from_millis(
            config
                .pacing
                .thinking_floor_ms
                .unwrap_or(DEFAULT_THINKING_FLOOR_MS),
        )
    };

    let timings = RevealTimings {
        reveal_stagger: Duration::from_millis(
            config
                .pacing
                .reveal_stagger_ms
                .unwrap_or(DEFAULT_REVEAL_STAGGER_MS),
        ),
        type_interval: Duration::from_millis(
            config
                .pacing
                .type_interval_ms
                .unwrap_or(DEFAULT_TYPE_INTERVAL_MS),
        ),
    };

    ResolvedConfig {
        model,
        api_key,
        base_url,
        params,
        thinking_floor,
        timings,
    }
}
