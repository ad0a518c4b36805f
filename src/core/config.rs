//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.predicta/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::conversation::ConversationId;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PredictaConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    /// Raw `Cookie` header sent with every request (session + csrftoken).
    pub cookie: Option<String>,
    /// Used when the cookie carries no `csrftoken`.
    pub csrf_token: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub typing_speed_ms: Option<u64>,
    pub toast_duration_ms: Option<u64>,
    pub conversations: Option<Vec<u64>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VoiceConfig {
    /// Program and arguments of an external speech-to-text command.
    pub command: Option<Vec<String>>,
    pub lang: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TYPING_SPEED_MS: u64 = 50;
pub const DEFAULT_TOAST_DURATION_MS: u64 = 4000;
pub const DEFAULT_VOICE_LANG: &str = "es-ES";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub cookie: Option<String>,
    pub csrf_token: Option<String>,
    pub typing_speed: Duration,
    pub toast_duration: Duration,
    pub conversations: Vec<ConversationId>,
    pub voice_command: Option<Vec<String>>,
    pub voice_lang: String,
}

/// Values coming from command-line flags.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
    pub conversations: &'a [u64],
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

/// Returns the path to `~/.predicta/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".predicta").join("config.toml"))
}

/// Load config from `~/.predicta/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PredictaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PredictaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PredictaConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PredictaConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: PredictaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Predicta Chat Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:8000"       # Or set PREDICTA_BASE_URL
# cookie = "sessionid=...; csrftoken=..."   # Or set PREDICTA_COOKIE
# csrf_token = "..."                        # Or set PREDICTA_CSRF_TOKEN

# [ui]
# typing_speed_ms = 50
# toast_duration_ms = 4000
# conversations = [12, 7]                   # Listed in the sidebar at startup

# [voice]
# command = ["whisper-listen", "--once"]    # Prints the transcript on stdout
# lang = "es-ES"
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
pub fn resolve(config: &PredictaConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PREDICTA_BASE_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Cookie and CSRF token: env → config
    let cookie = std::env::var("PREDICTA_COOKIE")
        .ok()
        .or_else(|| config.server.cookie.clone());
    let csrf_token = std::env::var("PREDICTA_CSRF_TOKEN")
        .ok()
        .or_else(|| config.server.csrf_token.clone());

    // Startup conversations: CLI → config
    let conversations = if cli.conversations.is_empty() {
        config.ui.conversations.clone().unwrap_or_default()
    } else {
        cli.conversations.to_vec()
    };

    ResolvedConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        cookie,
        csrf_token,
        typing_speed: Duration::from_millis(
            config.ui.typing_speed_ms.unwrap_or(DEFAULT_TYPING_SPEED_MS),
        ),
        toast_duration: Duration::from_millis(
            config.ui.toast_duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS),
        ),
        conversations: conversations.into_iter().map(ConversationId).collect(),
        voice_command: config.voice.command.clone().filter(|c| !c.is_empty()),
        voice_lang: config
            .voice
            .lang
            .clone()
            .unwrap_or_else(|| DEFAULT_VOICE_LANG.to_string()),
    }
}
