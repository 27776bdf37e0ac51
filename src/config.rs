use std::path::Path;

use crate::error::Error;
use crate::groups::GAMEOBJECT_CLASS;
use crate::registry::DEFAULT_MINT_BASE;
use crate::repair::RepairOptions;

/// Tool configuration loaded from `.scenefix.toml`.
/// Overrides are rare; the defaults match Unity scene conventions.
pub struct Config {
    mint_base: i64,
    owner_class: u64,
}

/// Raw TOML structure for `.scenefix.toml`.
#[derive(serde::Deserialize)]
struct ScenefixTomlConfig {
    #[serde(default)]
    mint_base: Option<i64>,
    #[serde(default)]
    owner_class: Option<u64>,
}

impl Config {
    /// Load config from `.scenefix.toml` in the given root directory.
    /// Returns Unity defaults if the file doesn't exist. Returns an error
    /// if the file exists but is malformed — never silently falls back to
    /// defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".scenefix.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::unity_defaults()),
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: ScenefixTomlConfig = toml::from_str(&content)?;
        Ok(Self {
            mint_base: raw.mint_base.unwrap_or(DEFAULT_MINT_BASE),
            owner_class: raw.owner_class.unwrap_or(GAMEOBJECT_CLASS),
        })
    }

    /// Repair tunables derived from this config.
    pub fn repair_options(&self) -> RepairOptions {
        RepairOptions {
            mint_base: self.mint_base,
            owner_class: self.owner_class,
        }
    }

    /// Defaults for Unity scenes: GameObject owner class, high mint base.
    fn unity_defaults() -> Self {
        Self {
            mint_base: DEFAULT_MINT_BASE,
            owner_class: GAMEOBJECT_CLASS,
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".scenefix.toml"), "mint_base = \"not a number\"").unwrap();
        let outcome = Config::load(dir.path());
        assert!(matches!(outcome, Err(Error::TomlDe(_))), "expected TOML error");
    }

    #[test]
    fn missing_config_uses_unity_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        let options = config.repair_options();
        assert_eq!(options.mint_base, DEFAULT_MINT_BASE, "default mint base");
        assert_eq!(options.owner_class, GAMEOBJECT_CLASS, "default owner class");
    }

    #[test]
    fn overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".scenefix.toml"),
            "mint_base = 1000000000\nowner_class = 7\n",
        )
        .unwrap();
        let options = Config::load(dir.path()).unwrap().repair_options();
        assert_eq!(options.mint_base, 1_000_000_000, "mint base override");
        assert_eq!(options.owner_class, 7, "owner class override");
    }
}
