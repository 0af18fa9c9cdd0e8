// src/solutions.rs

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufWriter};

use crate::errors::{HarnessError, Result};

pub const START_MARKER: &str = "solution start";
pub const END_MARKER: &str = "solution end";

/// Path of the `n`th captured solution (1-based).
pub fn solution_path(dir: &Path, n: usize) -> PathBuf {
    dir.join(format!("solution{}.solution", n))
}

/// Splits a line-oriented stream into numbered solution files.
///
/// A block starts at any line containing `solution start` and ends at the
/// first following line containing `solution end`. Marker lines are not
/// copied. Text between blocks is ignored. Lines are handled as raw bytes,
/// so bodies need not be valid UTF-8.
pub struct SolutionStream<R> {
    reader: R,
    line: Vec<u8>,
    dir: PathBuf,
    count: usize,
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

impl<R: AsyncBufRead + Unpin> SolutionStream<R> {
    pub fn new(reader: R, dir: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            line: Vec::new(),
            dir: dir.into(),
            count: 0,
        }
    }

    /// Number of blocks seen so far, including one that failed to complete.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Reads one line into `self.line` without its terminator. Returns
    /// false at end of input.
    async fn next_line(&mut self) -> Result<bool> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line).await? == 0 {
            return Ok(false);
        }
        if self.line.ends_with(b"\n") {
            self.line.pop();
            if self.line.ends_with(b"\r") {
                self.line.pop();
            }
        }
        Ok(true)
    }

    /// Captures the next block into its file and returns the path, or
    /// `None` once the input is exhausted.
    pub async fn next_solution(&mut self) -> Result<Option<PathBuf>> {
        while self.next_line().await? {
            if !contains(&self.line, START_MARKER) {
                continue;
            }
            self.count += 1;
            let path = solution_path(&self.dir, self.count);
            println!("Reading solution into {}", path.display());
            self.capture(&path).await?;
            return Ok(Some(path));
        }
        Ok(None)
    }

    async fn capture(&mut self, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path).await?);
        while self.next_line().await? {
            if contains(&self.line, END_MARKER) {
                out.flush().await?;
                return Ok(());
            }
            out.write_all(&self.line).await?;
            out.write_all(b"\n").await?;
        }
        // Keep what was read so the truncated block can be inspected.
        out.flush().await?;
        Err(HarnessError::IncompleteSolution {
            path: path.to_path_buf(),
        })
    }
}
