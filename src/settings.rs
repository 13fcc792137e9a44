//! Game settings
//!
//! Driver-facing configuration: tick interval and key bindings per game, plus
//! an optional RNG seed. Physics constants are fixed and live in `consts`.
//! Stored as JSON. A file only needs the fields it changes: everything it
//! leaves out keeps the stock value for that game.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sim::entity::Side;
use crate::sim::input::{Action, Key};
use crate::sim::state::GameKind;

/// Key bindings for one game. Unused actions are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeyBindings {
    pub left_up: Option<Key>,
    pub left_down: Option<Key>,
    pub right_up: Option<Key>,
    pub right_down: Option<Key>,
    pub rotate_left: Option<Key>,
    pub rotate_right: Option<Key>,
    pub fire: Option<Key>,
    pub restart: Option<Key>,
}

impl KeyBindings {
    /// Stock layout for a game
    pub fn defaults_for(kind: GameKind) -> Self {
        match kind {
            GameKind::Pong => Self {
                left_up: Some(Key::Char('q')),
                left_down: Some(Key::Char('a')),
                right_up: Some(Key::Char('p')),
                right_down: Some(Key::Char('l')),
                restart: Some(Key::Char('r')),
                ..Default::default()
            },
            GameKind::Shooter => Self {
                rotate_left: Some(Key::Left),
                rotate_right: Some(Key::Right),
                fire: Some(Key::Space),
                ..Default::default()
            },
        }
    }

    /// Action bound to a key, if any
    pub fn action_for(&self, key: Key) -> Option<Action> {
        let table = [
            (self.left_up, Action::PaddleUp(Side::Left)),
            (self.left_down, Action::PaddleDown(Side::Left)),
            (self.right_up, Action::PaddleUp(Side::Right)),
            (self.right_down, Action::PaddleDown(Side::Right)),
            (self.rotate_left, Action::RotateLeft),
            (self.rotate_right, Action::RotateRight),
            (self.fire, Action::Fire),
            (self.restart, Action::Restart),
        ];
        table
            .into_iter()
            .find(|(bound, _)| *bound == Some(key))
            .map(|(_, action)| action)
    }

    /// Key bound to an action, if any
    pub fn key_for(&self, action: Action) -> Option<Key> {
        match action {
            Action::PaddleUp(Side::Left) => self.left_up,
            Action::PaddleDown(Side::Left) => self.left_down,
            Action::PaddleUp(Side::Right) => self.right_up,
            Action::PaddleDown(Side::Right) => self.right_down,
            Action::RotateLeft => self.rotate_left,
            Action::RotateRight => self.rotate_right,
            Action::Fire => self.fire,
            Action::Restart => self.restart,
        }
    }

    /// Bindings set in `overrides` replace ours; the rest stay
    fn overlay(self, overrides: KeyBindings) -> Self {
        Self {
            left_up: overrides.left_up.or(self.left_up),
            left_down: overrides.left_down.or(self.left_down),
            right_up: overrides.right_up.or(self.right_up),
            right_down: overrides.right_down.or(self.right_down),
            rotate_left: overrides.rotate_left.or(self.rotate_left),
            rotate_right: overrides.rotate_right.or(self.rotate_right),
            fire: overrides.fire.or(self.fire),
            restart: overrides.restart.or(self.restart),
        }
    }
}

/// Per-game driver settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantSettings {
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    pub keys: KeyBindings,
}

impl VariantSettings {
    pub fn defaults_for(kind: GameKind) -> Self {
        Self {
            tick_interval_ms: kind.tick_interval().as_millis() as u64,
            keys: KeyBindings::defaults_for(kind),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    fn overlay(kind: GameKind, file: VariantFile) -> Self {
        let defaults = Self::defaults_for(kind);
        Self {
            tick_interval_ms: file.tick_interval_ms.unwrap_or(defaults.tick_interval_ms),
            keys: defaults.keys.overlay(file.keys),
        }
    }
}

/// On-disk form of one game's settings; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VariantFile {
    tick_interval_ms: Option<u64>,
    keys: KeyBindings,
}

/// On-disk form of [`Settings`]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    seed: Option<u64>,
    pong: VariantFile,
    shooter: VariantFile,
}

impl From<SettingsFile> for Settings {
    fn from(file: SettingsFile) -> Self {
        Self {
            seed: file.seed,
            pong: VariantSettings::overlay(GameKind::Pong, file.pong),
            shooter: VariantSettings::overlay(GameKind::Shooter, file.shooter),
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SettingsFile")]
pub struct Settings {
    /// Fixed seed for reproducible runs; random when absent
    pub seed: Option<u64>,
    pub pong: VariantSettings,
    pub shooter: VariantSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            pong: VariantSettings::defaults_for(GameKind::Pong),
            shooter: VariantSettings::defaults_for(GameKind::Shooter),
        }
    }
}

impl Settings {
    /// Settings for one game
    pub fn variant(&self, kind: GameKind) -> &VariantSettings {
        match kind {
            GameKind::Pong => &self.pong,
            GameKind::Shooter => &self.shooter,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals() {
        let settings = Settings::default();
        assert_eq!(settings.variant(GameKind::Pong).tick_interval(), Duration::from_millis(20));
        assert_eq!(settings.variant(GameKind::Shooter).tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_action_lookup() {
        let pong = KeyBindings::defaults_for(GameKind::Pong);
        assert_eq!(pong.action_for(Key::Char('q')), Some(Action::PaddleUp(Side::Left)));
        assert_eq!(pong.action_for(Key::Char('l')), Some(Action::PaddleDown(Side::Right)));
        assert_eq!(pong.action_for(Key::Char('r')), Some(Action::Restart));
        assert_eq!(pong.action_for(Key::Space), None);
        assert_eq!(pong.key_for(Action::Restart), Some(Key::Char('r')));

        let shooter = KeyBindings::defaults_for(GameKind::Shooter);
        assert_eq!(shooter.action_for(Key::Space), Some(Action::Fire));
        assert_eq!(shooter.action_for(Key::Char('r')), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.pong, VariantSettings::defaults_for(GameKind::Pong));
    }

    #[test]
    fn test_keys_serialize_as_symbols() {
        let json = Settings::default().to_json().unwrap();
        assert!(json.contains(r#""left_up": "q""#));
        assert!(json.contains(r#""fire": "space""#));

        let custom = r#"{ "shooter": { "tick_interval_ms": 40, "keys": { "fire": "Return" } } }"#;
        let settings = Settings::from_json(custom).unwrap();
        assert_eq!(settings.shooter.keys.fire, Some(Key::Enter));
        assert_eq!(settings.shooter.keys.rotate_left, Some(Key::Left));
        assert_eq!(settings.shooter.tick_interval_ms, 40);
    }

    #[test]
    fn test_variant_without_interval_keeps_seed() {
        let settings = Settings::from_json(r#"{ "seed": 9, "pong": { "keys": { "left_up": "w" } } }"#).unwrap();
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.pong.tick_interval_ms, 20);
        assert_eq!(settings.pong.keys.left_up, Some(Key::Char('w')));
        assert_eq!(settings.shooter, VariantSettings::defaults_for(GameKind::Shooter));
    }

    #[test]
    fn test_single_key_override_keeps_other_bindings() {
        let settings = Settings::from_json(r#"{ "pong": { "tick_interval_ms": 20, "keys": { "left_up": "w" } } }"#).unwrap();
        let keys = &settings.pong.keys;
        assert_eq!(keys.action_for(Key::Char('w')), Some(Action::PaddleUp(Side::Left)));
        assert_eq!(keys.action_for(Key::Char('q')), None);
        assert_eq!(keys.left_down, Some(Key::Char('a')));
        assert_eq!(keys.right_up, Some(Key::Char('p')));
        assert_eq!(keys.right_down, Some(Key::Char('l')));
        assert_eq!(keys.restart, Some(Key::Char('r')));
    }

    #[test]
    fn test_load_partial_file() {
        let path = std::env::temp_dir().join(format!("arcade-sim-partial-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "seed": 9, "shooter": { "keys": { "fire": "f" } } }"#).unwrap();
        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.seed, Some(9));
        assert_eq!(loaded.shooter.keys.fire, Some(Key::Char('f')));
        assert_eq!(loaded.shooter.tick_interval_ms, 50);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let bad = r#"{ "pong": { "tick_interval_ms": 20, "keys": { "left_up": "Hyper_L" } } }"#;
        assert!(Settings::from_json(bad).is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/definitely/not/here/settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("arcade-sim-settings-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.seed = Some(7);
        settings.pong.tick_interval_ms = 16;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
