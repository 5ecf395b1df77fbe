//! Output file stream that remembers write failures.
//!
//! Transforms see a plain [`Write`], so an `io::Error` coming back from them
//! may come from either side. The stream records its own failures, which lets
//! [`Output::source_error`] tell a failed write apart from a failed read.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::core::{BuildError, BuildResult};

/// A buffered output file being generated.
#[derive(Debug)]
pub struct Output {
    path: PathBuf,
    inner: BufWriter<File>,
    failed: Option<io::Error>,
}

impl Output {
    /// Create (truncate) the output file.
    pub fn create(path: &Path) -> BuildResult<Self> {
        let file = File::create(path).map_err(|e| BuildError::write(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            inner: BufWriter::new(file),
            failed: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write literal text.
    pub fn text(&mut self, s: &str) -> BuildResult<()> {
        self.write_all(s.as_bytes())
            .map_err(|e| self.write_error(e))
    }

    /// Copy a file verbatim.
    pub fn insert_file(&mut self, source: &Path) -> BuildResult<()> {
        let mut reader = open(source)?;
        let mut buf = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => return Ok(()),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(BuildError::read(source, e)),
            };
            self.write_all(&buf[..n])
                .map_err(|e| self.write_error(e))?;
        }
    }

    /// Attribute an error returned while streaming `source` into this output.
    pub fn source_error(&mut self, source: &Path, e: io::Error) -> BuildError {
        match self.failed.take() {
            Some(failed) => BuildError::write(&self.path, failed),
            None => BuildError::read(source, e),
        }
    }

    /// Flush and close. A stream that failed earlier reports that failure.
    pub fn finish(mut self) -> BuildResult<PathBuf> {
        if let Err(e) = self.flush() {
            return Err(self.write_error(e));
        }
        if let Some(failed) = self.failed.take() {
            return Err(BuildError::write(&self.path, failed));
        }
        Ok(self.path)
    }

    fn write_error(&mut self, e: io::Error) -> BuildError {
        BuildError::write(&self.path, self.failed.take().unwrap_or(e))
    }

    fn record<T>(&mut self, result: io::Result<T>) -> io::Result<T> {
        result.map_err(|e| {
            let kind = e.kind();
            self.failed = Some(e);
            io::Error::from(kind)
        })
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let result = self.inner.write(buf);
        self.record(result)
    }

    fn flush(&mut self) -> io::Result<()> {
        let result = self.inner.flush();
        self.record(result)
    }
}

/// Open a resource for reading.
pub fn open(path: &Path) -> BuildResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| BuildError::open(path, e))
}
