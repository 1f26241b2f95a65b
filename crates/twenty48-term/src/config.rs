use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Key bindings for the terminal front-end. Each entry is the full line the
/// player types (matched case-insensitively).
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct KeyBindings {
    #[serde(default = "defaults::left")]
    pub left: String,
    #[serde(default = "defaults::right")]
    pub right: String,
    #[serde(default = "defaults::up")]
    pub up: String,
    #[serde(default = "defaults::down")]
    pub down: String,
    #[serde(default = "defaults::start")]
    pub start: String,
    #[serde(default = "defaults::quit")]
    pub quit: String,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, Default)]
pub struct Config {
    /// Fixed RNG seed; entropy when omitted. `--seed` on the CLI wins.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub keys: KeyBindings,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: defaults::left(),
            right: defaults::right(),
            up: defaults::up(),
            down: defaults::down(),
            start: defaults::start(),
            quit: defaults::quit(),
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path)
            .with_context(|| format!("failed to open config {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(cfg)
    }
}

mod defaults {
    pub fn left() -> String { "a".into() }
    pub fn right() -> String { "d".into() }
    pub fn up() -> String { "w".into() }
    pub fn down() -> String { "s".into() }
    pub fn start() -> String { "n".into() }
    pub fn quit() -> String { "q".into() }
}
