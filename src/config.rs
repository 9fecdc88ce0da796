// config.rs

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

impl Config {
    pub fn db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| data_dir().join("todos.db"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "ticklist")
}

pub fn data_dir() -> PathBuf {
    let dir = project_dirs()
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir).ok();
    dir
}

pub fn config_path() -> PathBuf {
    let dir = project_dirs()
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir).ok();
    dir.join("config.json")
}

pub fn log_file_path() -> PathBuf {
    data_dir().join("ticklist.log")
}

pub fn load_config() -> Config {
    load_config_from(&config_path())
}

// Missing or unreadable config means defaults, never a startup failure
fn load_config_from(path: &Path) -> Config {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return Config::default(),
    };
    serde_json::from_reader(BufReader::new(file)).unwrap_or_default()
}
