use std::{env, fs, path::Path};

use anyhow::{Context, Result};

use super::super::exit_status::ExitStatus;
use super::super::report::print_init;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<ExitStatus> {
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    init_in(&current_dir)
}

/// Write the default configuration into `dir`, refusing to replace an existing file.
fn init_in(dir: &Path) -> Result<ExitStatus> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    print_init();

    Ok(ExitStatus::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::tempdir;

    #[test]
    fn writes_a_loadable_default_config() {
        let dir = tempdir().unwrap();
        assert_eq!(init_in(dir.path()).unwrap(), ExitStatus::Success);

        let loaded = load_config(dir.path()).unwrap();
        assert!(loaded.from_file);
        assert_eq!(loaded.config.hash_module, "tiger");
    }

    #[test]
    fn keeps_an_existing_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "terse": true }"#).unwrap();

        assert_eq!(init_in(dir.path()).unwrap(), ExitStatus::Failure);
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{ "terse": true }"#);
    }
}
