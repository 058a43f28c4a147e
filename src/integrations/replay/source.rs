// src/integrations/replay/source.rs
//
// Where replay bytes come from: a file on disk or an upload held in memory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extension written by the game client
pub const REPLAY_EXTENSION: &str = "StormReplay";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaySource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl ReplaySource {
    /// Load the whole replay into memory
    pub fn into_bytes(self) -> std::io::Result<Vec<u8>> {
        match self {
            ReplaySource::Path(path) => std::fs::read(path),
            ReplaySource::Bytes(bytes) => Ok(bytes),
        }
    }

    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            ReplaySource::Path(path) => path.display().to_string(),
            ReplaySource::Bytes(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }

    /// Every replay file below a directory, sorted by path
    pub fn discover(directory: &Path) -> std::io::Result<Vec<ReplaySource>> {
        if !directory.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not a directory", directory.display()),
            ));
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(directory)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && is_replay_file(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        paths.sort();

        Ok(paths.into_iter().map(ReplaySource::Path).collect())
    }
}

fn is_replay_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(REPLAY_EXTENSION))
        .unwrap_or(false)
}

impl From<PathBuf> for ReplaySource {
    fn from(path: PathBuf) -> Self {
        ReplaySource::Path(path)
    }
}

impl From<&Path> for ReplaySource {
    fn from(path: &Path) -> Self {
        ReplaySource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ReplaySource {
    fn from(bytes: Vec<u8>) -> Self {
        ReplaySource::Bytes(bytes)
    }
}
