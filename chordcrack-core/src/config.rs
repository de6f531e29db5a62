use std::path::PathBuf;

use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    runtime: RuntimeConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    rounds_per_game: Option<u32>,
    volume: Option<f32>,
    username: Option<String>,
}

#[derive(Deserialize, Default)]
struct RuntimeConfig {
    autosave: Option<bool>,
}

pub struct Config {
    defaults: DefaultsConfig,
    runtime: RuntimeConfig,
}

impl Config {
    /// Load the embedded defaults, then merge the user override file on top
    /// if one exists. Malformed user config is ignored with a warning.
    pub fn load() -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_defaults(&mut base.defaults, user.defaults);
                            merge_runtime(&mut base.runtime, user.runtime);
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            defaults: base.defaults,
            runtime: base.runtime,
        }
    }

    /// Rounds in a standard or daily game.
    pub fn rounds_per_game(&self) -> u32 {
        self.defaults.rounds_per_game.unwrap_or(5).max(1)
    }

    pub fn volume(&self) -> f32 {
        self.defaults.volume.unwrap_or(0.8).clamp(0.0, 1.0)
    }

    pub fn username(&self) -> String {
        self.defaults
            .username
            .clone()
            .unwrap_or_else(|| "player".to_string())
    }

    pub fn autosave(&self) -> bool {
        self.runtime.autosave.unwrap_or(true)
    }
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.rounds_per_game.is_some() {
        base.rounds_per_game = user.rounds_per_game;
    }
    if user.volume.is_some() {
        base.volume = user.volume;
    }
    if user.username.is_some() {
        base.username = user.username;
    }
}

fn merge_runtime(base: &mut RuntimeConfig, user: RuntimeConfig) {
    if user.autosave.is_some() {
        base.autosave = user.autosave;
    }
}

/// `~/.config/chordcrack/config.toml`
fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chordcrack").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let parsed: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed.defaults.rounds_per_game, Some(5));
        assert_eq!(parsed.runtime.autosave, Some(true));
    }

    #[test]
    fn merge_prefers_user_values() {
        let mut base = DefaultsConfig {
            rounds_per_game: Some(5),
            volume: Some(0.8),
            username: Some("player".into()),
        };
        merge_defaults(
            &mut base,
            DefaultsConfig {
                rounds_per_game: Some(8),
                volume: None,
                username: None,
            },
        );
        assert_eq!(base.rounds_per_game, Some(8));
        assert_eq!(base.volume, Some(0.8));
    }
}
