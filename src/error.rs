use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StorageError {
    Io { path: PathBuf, source: io::Error },
    Malformed { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on {}: {source}", path.display()),
            Self::Malformed { path, source } => {
                write!(f, "malformed document {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
        }
    }
}

#[derive(Debug)]
pub enum AudioError {
    NoDevice(String),
    Open { path: PathBuf, source: io::Error },
    Decode { path: PathBuf, reason: String },
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDevice(reason) => write!(f, "no audio output: {reason}"),
            Self::Open { path, source } => {
                write!(f, "cannot open sound {}: {source}", path.display())
            }
            Self::Decode { path, reason } => {
                write!(f, "cannot decode sound {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for AudioError {}
