use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use serde::{Deserialize, Serialize};

use crate::collect::Packager;
use crate::hash::HashModule;

pub const CONFIG_FILE_NAME: &str = ".fbtrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Hash module used by the text packager (`tiger`, `jenkins` or `md5`).
    #[serde(default = "default_hash_module")]
    pub hash_module: String,
    #[serde(default)]
    pub packager: Packager,
    /// Split enum phrases for runtimes without enum support.
    #[serde(default)]
    pub react_native_mode: bool,
    /// Leave the tables out of the collect output.
    #[serde(default)]
    pub terse: bool,
    #[serde(default)]
    pub pretty: bool,
}

fn default_hash_module() -> String {
    HashModule::default().name().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hash_module: default_hash_module(),
            packager: Packager::default(),
            react_native_mode: false,
            terse: false,
            pretty: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if `hashModule` does not name a supported hash module.
    pub fn validate(&self) -> Result<()> {
        self.hash_module()?;
        Ok(())
    }

    pub fn hash_module(&self) -> Result<HashModule> {
        self.hash_module
            .parse::<HashModule>()
            .with_context(|| format!("Invalid 'hashModule' in {}", CONFIG_FILE_NAME))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::error::FbtError;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.hash_module, "tiger");
        assert_eq!(config.packager, Packager::Text);
        assert!(!config.react_native_mode);
        assert!(!config.terse);
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "hashModule": "jenkins",
              "packager": "both",
              "reactNativeMode": true
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.hash_module().unwrap(), HashModule::Jenkins);
        assert_eq!(config.packager, Packager::Both);
        assert!(config.react_native_mode);
        assert!(!config.pretty);
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("components");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "terse": true }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert!(result.config.terse);
        assert_eq!(result.config.hash_module, "tiger");
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config.packager, Packager::Text);
    }

    #[test]
    fn test_validate_unknown_hash_module() {
        let config = Config {
            hash_module: "sha1".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("hashModule"));
        assert_eq!(
            err.downcast_ref::<FbtError>(),
            Some(&FbtError::UnsupportedHashModule {
                name: "sha1".to_string()
            })
        );
    }

    #[test]
    fn test_load_config_with_unknown_packager_fails() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "packager": "zip" }"#,
        )
        .unwrap();

        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = default_config_json().unwrap();
        assert!(json.contains("hashModule"));
        assert!(json.contains("reactNativeMode"));
        assert!(!json.contains("hash_module"));
    }
}
