use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// One library location with a user-facing display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDir {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub alias: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicBrainzKeys {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(default)]
    pub tmdb: String,
    #[serde(default)]
    pub musicbrainz: MusicBrainzKeys,
}

/// The launcher's persisted configuration document.
///
/// Loading never fails: an absent, unreadable or malformed file degrades to
/// the default (empty) configuration with a trace instead of an error, so a
/// config is always constructible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_keys: ApiKeys,
    #[serde(default, rename = "media_directories")]
    pub media_dirs: Vec<MediaDir>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No config at {}: {e}", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Malformed config at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    pub fn tmdb_api_key(&self) -> &str {
        &self.api_keys.tmdb
    }

    pub fn mb_client_id(&self) -> &str {
        &self.api_keys.musicbrainz.client_id
    }

    pub fn mb_client_secret(&self) -> &str {
        &self.api_keys.musicbrainz.client_secret
    }
}
