use std::fs::File;
use std::io::{BufWriter, Write};

use crate::document::model::ObjectNode;
use crate::document::sink::{ChunkError, DocumentSink, FileSinkOpts, open_output, write_chunk};
use crate::foundation::error::{ExportError, ExportResult};

/// Streams the document as JSON: `{"objects":[...]}` with one object per line.
///
/// The output deserializes into [`crate::Document`]. Like [`crate::XmlSink`], each object goes
/// out as one fragment (separator included) and dropping a begun sink closes the array and
/// object. A fragment cut short by a write failure poisons the sink.
pub struct JsonSink<W: Write> {
    out: Option<W>,
    written: usize,
    open: bool,
    poisoned: bool,
}

impl<W: Write> JsonSink<W> {
    /// Wrap an already acquired writer.
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            written: 0,
            open: false,
            poisoned: false,
        }
    }

    /// Finish the document if needed and return the underlying writer.
    pub fn into_inner(mut self) -> ExportResult<W> {
        self.finish()?;
        self.out
            .take()
            .ok_or_else(|| ExportError::sink("json sink writer already released"))
    }

    fn out(&mut self) -> ExportResult<&mut W> {
        self.out
            .as_mut()
            .ok_or_else(|| ExportError::sink("json sink writer already released"))
    }

    fn emit(&mut self, fragment: &[u8]) -> ExportResult<()> {
        let out = self.out()?;
        match write_chunk(out, fragment) {
            Ok(()) => Ok(()),
            Err(ChunkError::Clean(e)) => Err(e.into()),
            Err(ChunkError::Torn(e)) => {
                self.poisoned = true;
                Err(e.into())
            }
        }
    }
}

impl JsonSink<BufWriter<File>> {
    /// Create (or replace) the output file and wrap it.
    pub fn create(file: &FileSinkOpts) -> ExportResult<Self> {
        Ok(Self::new(open_output(file)?))
    }
}

impl<W: Write> DocumentSink for JsonSink<W> {
    fn begin(&mut self) -> ExportResult<()> {
        if self.open || self.poisoned {
            return Err(ExportError::sink("json sink already begun"));
        }
        self.emit(b"{\"objects\":[")?;
        self.open = true;
        self.written = 0;
        Ok(())
    }

    fn write_object(&mut self, object: &ObjectNode) -> ExportResult<()> {
        if self.poisoned {
            return Err(ExportError::sink("json output is incomplete after a failed write"));
        }
        if !self.open {
            return Err(ExportError::sink("json sink is not accepting objects"));
        }
        let line = serde_json::to_string(object)
            .map_err(|e| ExportError::serde(format!("encode object '{}': {e}", object.id)))?;
        let mut fragment = String::with_capacity(line.len() + 2);
        fragment.push_str(if self.written == 0 { "\n" } else { ",\n" });
        fragment.push_str(&line);
        self.emit(fragment.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> ExportResult<()> {
        if self.poisoned {
            return Err(ExportError::sink("json output is incomplete after a failed write"));
        }
        if !self.open {
            return Ok(());
        }
        self.emit(b"\n]}\n")?;
        self.open = false;
        self.out()?.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for JsonSink<W> {
    fn drop(&mut self) {
        if self.out.is_some()
            && let Err(e) = self.finish()
        {
            tracing::warn!("closing json output failed: {e}");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/json.rs"]
mod tests;
