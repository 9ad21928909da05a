use crate::frame::Frame;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameIoError {
    #[error("reading frame file {path:?} failed")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("writing frame file {path:?} failed")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("frame file {path:?} is not a valid frame: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("serializing frame failed")]
    Serialize(#[from] serde_yaml::Error),
}

pub type FrameIoResult<T> = Result<T, FrameIoError>;

/// Parses a frame document. Scalars like `.inf`, `.nan`, `1e5` and `.5`
/// come back as floats. An empty document is an empty frame.
pub fn parse_frame_str(content: &str) -> Result<Frame, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Frame::default());
    }
    serde_yaml::from_str(content)
}

pub fn frame_to_string(frame: &Frame) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(frame)
}

pub fn parse_frame(path: &Path) -> FrameIoResult<Frame> {
    let content = std::fs::read_to_string(path).map_err(|source| FrameIoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_frame_str(&content).map_err(|source| FrameIoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_frame(frame: &Frame, path: &Path) -> FrameIoResult<()> {
    let content = frame_to_string(frame)?;
    std::fs::write(path, content).map_err(|source| FrameIoError::Write {
        path: path.to_path_buf(),
        source,
    })
}
