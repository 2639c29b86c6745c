//! Configuration loading and parsing.
//!
//! Parses `ved.toml` (or an override path provided by the binary). Two
//! tables are recognised:
//!
//! ```toml
//! [files]
//! help = "helper.txt"   # file loaded by the `h` command
//!
//! [editor]
//! page_rows = 0         # rows moved by PageUp/PageDown; 0 = screen rows
//! ```
//!
//! Every field has a default. A missing file yields defaults silently; a file
//! that fails to parse yields defaults and a `warn` on the `config` target.
//! Unknown fields are ignored so older binaries tolerate newer files.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "ved.toml";
pub const DEFAULT_HELP_FILE: &str = "helper.txt";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FilesConfig {
    #[serde(default = "FilesConfig::default_help")]
    pub help: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            help: Self::default_help(),
        }
    }
}

impl FilesConfig {
    fn default_help() -> PathBuf {
        PathBuf::from(DEFAULT_HELP_FILE)
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default)]
    pub page_rows: u16,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path: `ved.toml` in the working directory, else the
/// platform config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("ved").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Help file loaded by the `h` command.
    pub fn help_path(&self) -> &PathBuf {
        &self.file.files.help
    }

    /// Rows moved by a page motion given the current screen height. A
    /// configured value of 0 follows the screen; the result is at least 1.
    pub fn page_rows(&self, screen_rows: u16) -> usize {
        let rows = match self.file.editor.page_rows {
            0 => screen_rows,
            n => n,
        };
        usize::from(rows.max(1))
    }
}
