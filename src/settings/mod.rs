use std::{
    fs, io,
    path::{Path, PathBuf},
};

use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gameboard::algorithms::Algorithm;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Can't read settings file: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazePreset {
    pub title: String,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub default_maze_gen_algo: Option<Algorithm>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub mazes: Option<Vec<MazePreset>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_default_maze_gen_algo(mut self, value: Algorithm) -> Self {
        self.default_maze_gen_algo = Some(value);
        self
    }

    pub fn get_default_maze_gen_algo(&self) -> Algorithm {
        self.default_maze_gen_algo.unwrap_or_default()
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_mazes(mut self, value: Vec<MazePreset>) -> Self {
        self.mazes = Some(value);
        self
    }

    pub fn get_mazes(&self) -> Vec<MazePreset> {
        self.mazes.clone().unwrap_or_default()
    }

    /// Preset marked as default, or the first one when none is.
    pub fn default_preset(&self) -> Option<MazePreset> {
        let mazes = self.get_mazes();
        mazes
            .iter()
            .find(|preset| preset.default)
            .or_else(|| mazes.first())
            .cloned()
    }

    pub fn find_preset(&self, title: &str) -> Option<MazePreset> {
        self.get_mazes()
            .into_iter()
            .find(|preset| preset.title.eq_ignore_ascii_case(title))
    }

    /// `<config dir>/ariadne/settings.ron`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ariadne").join("settings.ron"))
    }

    pub fn from_ron(text: &str) -> Result<Self, SettingsError> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(text)?)
    }

    pub fn builtin() -> Result<Self, SettingsError> {
        Self::from_ron(DEFAULT_SETTINGS)
    }

    /// Reads the settings file, a missing file means built-in settings.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_ron(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {:?}, using defaults", path);
                Self::builtin()
            }
            Err(err) => Err(err.into()),
        }
    }
}
