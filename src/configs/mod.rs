use crate::vector::shapefile::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Reader settings. Backed by a settings.json file in the working directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Configs {
    pub verbose_mode: bool,
    /// Fail on a record number that is not the previous one plus one,
    /// rather than logging it.
    pub strict_record_numbers: bool,
}

impl Default for Configs {
    fn default() -> Configs {
        Configs {
            verbose_mode: false,
            strict_record_numbers: false,
        }
    }
}

impl Configs {
    pub fn new() -> Configs {
        Configs::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Configs> {
        let contents = fs::read_to_string(path)?;
        let configs: Configs = serde_json::from_str(&contents)?;
        Ok(configs)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let configs_json = serde_json::to_string_pretty(self)?;
        fs::write(path, configs_json)?;
        Ok(())
    }
}

fn settings_file() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join("settings.json"))
}

/// Reads settings.json from the working directory, falling back to the
/// defaults when there is no such file.
pub fn get_configs() -> Result<Configs> {
    let config_file = settings_file()?;
    if !config_file.exists() {
        return Ok(Configs::new());
    }
    Configs::from_file(config_file)
}

pub fn save_configs(configs: &Configs) -> Result<()> {
    configs.save(settings_file()?)
}
