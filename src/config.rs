use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Where the gallery keeps its state on disk.
#[derive(Clone, Debug)]
pub struct Config {
    data_dir: PathBuf,
}

impl Config {
    /// Use `arg` when given, otherwise the platform's local data directory.
    pub fn resolve(arg: Option<PathBuf>) -> Result<Self> {
        let data_dir = arg.unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("besafe")
        });
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("create data dir: {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn catalog_path(&self) -> String {
        self.data_dir.join("defaults.db").to_string_lossy().to_string()
    }

    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }
}
