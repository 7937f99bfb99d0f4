use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::document::model::{Document, ObjectNode};
use crate::foundation::error::{ExportError, ExportResult};

/// Sink contract for consuming exported objects in document order.
///
/// Ordering contract: `begin` is called once, then `write_object` once per selected object in
/// selection order, then `finish`. Sinks that hold external resources must leave a
/// well-formed document behind even when `finish` is never reached.
pub trait DocumentSink {
    /// Called once before any object is written.
    fn begin(&mut self) -> ExportResult<()>;
    /// Write one complete object node.
    fn write_object(&mut self, object: &ObjectNode) -> ExportResult<()>;
    /// Close the document and flush.
    fn finish(&mut self) -> ExportResult<()>;
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    document: Document,
    finished: bool,
}

impl MemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the collected document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whether `finish` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Take the collected document.
    pub fn into_document(self) -> Document {
        self.document
    }
}

impl DocumentSink for MemorySink {
    fn begin(&mut self) -> ExportResult<()> {
        self.document.objects.clear();
        self.finished = false;
        Ok(())
    }

    fn write_object(&mut self, object: &ObjectNode) -> ExportResult<()> {
        self.document.objects.push(object.clone());
        Ok(())
    }

    fn finish(&mut self) -> ExportResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Options for file-backed sinks.
#[derive(Clone, Debug)]
pub struct FileSinkOpts {
    /// Output file path.
    pub path: PathBuf,
    /// Replace the file if it already exists.
    pub overwrite: bool,
}

impl FileSinkOpts {
    /// Create options for writing to `path`, replacing any existing file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            overwrite: true,
        }
    }
}

/// Create or truncate the output file described by `opts`.
///
/// With `overwrite` off the file is created exclusively, so an existing file is never touched.
pub fn open_output(opts: &FileSinkOpts) -> ExportResult<BufWriter<File>> {
    ensure_parent_dir(&opts.path)?;
    let mut open = OpenOptions::new();
    open.write(true);
    if opts.overwrite {
        open.create(true).truncate(true);
    } else {
        open.create_new(true);
    }
    let f = open.open(&opts.path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => ExportError::sink(format!(
            "output file '{}' already exists",
            opts.path.display()
        )),
        _ => ExportError::sink(format!("create output '{}': {e}", opts.path.display())),
    })?;
    tracing::debug!(path = %opts.path.display(), "opened output");
    Ok(BufWriter::new(f))
}

/// Outcome of [`write_chunk`].
#[derive(Debug)]
pub(crate) enum ChunkError {
    /// Nothing of the chunk reached the writer; the output still ends on a chunk boundary.
    Clean(io::Error),
    /// Part of the chunk was written before the failure.
    Torn(io::Error),
}

/// Write `chunk` completely, reporting whether a failure left part of it behind.
///
/// Sinks write each document fragment as one chunk, so a clean failure can still be followed by
/// the closing markup.
pub(crate) fn write_chunk<W: Write + ?Sized>(
    out: &mut W,
    chunk: &[u8],
) -> Result<(), ChunkError> {
    let mut rest = chunk;
    while !rest.is_empty() {
        let err = match out.write(rest) {
            Ok(0) => io::Error::new(ErrorKind::WriteZero, "failed to write whole chunk"),
            Ok(n) => {
                rest = &rest[n..];
                continue;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => e,
        };
        return Err(if rest.len() == chunk.len() {
            ChunkError::Clean(err)
        } else {
            ChunkError::Torn(err)
        });
    }
    Ok(())
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> ExportResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            ExportError::sink(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/document/sink.rs"]
mod tests;
