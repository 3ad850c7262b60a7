//! Landmark frame input.
//!
//! The camera, face detector and landmark extractor live outside this
//! process. What reaches the monitor is a line-delimited JSON stream, one
//! record per frame:
//!
//! ```text
//! {"points": [[x0, y0], ..., [x67, y67]]}
//! {"points": null}
//! ```
//!
//! `null` (or a missing field) means no face was detected that frame. The
//! reader is generic over any [`AsyncBufRead`], which is also the test seam.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use crate::landmarks::{LandmarkError, LandmarkSet};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read landmark stream: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed landmark record at line {line}: {source}")]
    Parse {
        line: u64,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid landmarks at line {line}: {source}")]
    Landmarks {
        line: u64,
        #[source]
        source: LandmarkError,
    },
}

/// One decoded frame. `landmarks` is `None` when no face was detected.
#[derive(Debug, Clone)]
pub struct FrameInput {
    pub landmarks: Option<LandmarkSet>,
}

#[derive(Debug, Deserialize)]
struct FrameRecord {
    #[serde(default)]
    points: Option<Vec<[f64; 2]>>,
}

/// Line-delimited JSON frame reader.
pub struct JsonlSource<R> {
    reader: R,
    line: u64,
    buf: String,
}

impl JsonlSource<BufReader<File>> {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let file = File::open(path).await?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl JsonlSource<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> JsonlSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Reads the next frame record; `Ok(None)` at end of stream.
    ///
    /// Blank lines are skipped. Malformed JSON and invalid landmark sets
    /// are contract violations and abort the read with the 1-based line
    /// number; they are never skipped silently.
    pub async fn next_frame(&mut self) -> Result<Option<FrameInput>, SourceError> {
        loop {
            self.buf.clear();
            let read = self.reader.read_line(&mut self.buf).await?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;

            let trimmed = self.buf.trim();
            if trimmed.is_empty() {
                continue;
            }

            let record: FrameRecord =
                serde_json::from_str(trimmed).map_err(|source| SourceError::Parse {
                    line: self.line,
                    source,
                })?;

            let landmarks = match record.points {
                Some(coords) => Some(LandmarkSet::from_coords(coords).map_err(|source| {
                    SourceError::Landmarks {
                        line: self.line,
                        source,
                    }
                })?),
                None => None,
            };

            return Ok(Some(FrameInput { landmarks }));
        }
    }

    /// 1-based number of the last line read.
    pub fn line(&self) -> u64 {
        self.line
    }
}
