use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/client.json";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CHAT_PATH: &str = "/chat";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
    #[serde(default = "default_window_title")]
    pub window_title: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_chat_path() -> String {
    DEFAULT_CHAT_PATH.to_string()
}

fn default_window_title() -> String {
    "Travel Assistant".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            chat_path: default_chat_path(),
            window_title: default_window_title(),
        }
    }
}

impl AppConfig {
    /// URL đầy đủ của endpoint chat, ví dụ `http://127.0.0.1:5000/chat`.
    pub fn chat_endpoint(&self) -> String {
        let base = self.server_url.trim_end_matches('/');
        let path = self.chat_path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert_eq!(load_config(path.to_str().unwrap()), AppConfig::default());
    }

    #[test]
    fn invalid_json_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert_eq!(
            load_config(file.path().to_str().unwrap()),
            AppConfig::default()
        );
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "server_url": "http://travel.local:8080" }}"#).unwrap();

        let config = load_config(file.path().to_str().unwrap());
        assert_eq!(config.server_url, "http://travel.local:8080");
        assert_eq!(config.chat_path, DEFAULT_CHAT_PATH);
        assert_eq!(config.chat_endpoint(), "http://travel.local:8080/chat");
    }

    #[test]
    fn endpoint_joining_tolerates_slashes() {
        let config = AppConfig {
            server_url: "http://localhost:5000/".to_string(),
            chat_path: "/chat".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.chat_endpoint(), "http://localhost:5000/chat");

        let config = AppConfig {
            chat_path: "chat".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.chat_endpoint(), "http://127.0.0.1:5000/chat");
    }
}
