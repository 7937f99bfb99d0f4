//! Tagged markup rendition of the document.
//!
//! Layout:
//! - root element `Data`
//! - one `object` element per exported object, with an `id` attribute
//! - one element per exported attribute, named after it, with `type="static"|"keyed"`
//! - keyed attributes contain one `infinity` element followed by one `key` element per key

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::document::model::{
    AttributeNode, AttributePayload, CurvePayload, ObjectNode, bool_text, is_element_name,
    real_text,
};
use crate::document::sink::{ChunkError, DocumentSink, FileSinkOpts, open_output, write_chunk};
use crate::foundation::error::{ExportError, ExportResult};

/// Formatting options for [`XmlSink`].
#[derive(Clone, Debug)]
pub struct XmlSinkOpts {
    /// Indentation unit.
    pub indent: String,
    /// Line terminator.
    pub newline: String,
    /// Emit the `<?xml ...?>` declaration.
    pub declaration: bool,
}

impl Default for XmlSinkOpts {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            newline: "\r\n".to_string(),
            declaration: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    // `<Data` written, waiting to see whether the root has children.
    RootPending,
    RootOpen,
    Finished,
    // A fragment was cut short; nothing more is written.
    Poisoned,
}

/// Streams the document as indented markup.
///
/// Every object is rendered in full and written as one fragment. When a write fails before any
/// of the fragment went out, the sink stays usable and closing it (explicitly or on drop) still
/// produces a well-formed document. When a fragment is cut short the sink refuses further
/// output.
pub struct XmlSink<W: Write> {
    out: Option<W>,
    opts: XmlSinkOpts,
    state: State,
}

impl<W: Write> XmlSink<W> {
    /// Wrap an already acquired writer.
    pub fn new(out: W, opts: XmlSinkOpts) -> Self {
        Self {
            out: Some(out),
            opts,
            state: State::Idle,
        }
    }

    /// Finish the document if needed and return the underlying writer.
    pub fn into_inner(mut self) -> ExportResult<W> {
        if matches!(self.state, State::RootPending | State::RootOpen) {
            self.finish()?;
        }
        self.out
            .take()
            .ok_or_else(|| ExportError::sink("xml sink writer already released"))
    }

    fn out(&mut self) -> ExportResult<&mut W> {
        self.out
            .as_mut()
            .ok_or_else(|| ExportError::sink("xml sink writer already released"))
    }

    /// Write one fragment and move to `next` once all of it is out.
    fn emit(&mut self, fragment: &str, next: State) -> ExportResult<()> {
        let out = self.out()?;
        match write_chunk(out, fragment.as_bytes()) {
            Ok(()) => {
                self.state = next;
                Ok(())
            }
            Err(ChunkError::Clean(e)) => Err(e.into()),
            Err(ChunkError::Torn(e)) => {
                self.state = State::Poisoned;
                Err(e.into())
            }
        }
    }

    fn push_line(&self, buf: &mut String, depth: usize, text: &str) {
        buf.push_str(&self.opts.newline);
        for _ in 0..depth {
            buf.push_str(&self.opts.indent);
        }
        buf.push_str(text);
    }

    fn render_object(&self, buf: &mut String, object: &ObjectNode) -> ExportResult<()> {
        let id = escape(&object.id);
        if object.attributes.is_empty() {
            self.push_line(buf, 1, &format!("<object id=\"{id}\" />"));
            return Ok(());
        }
        self.push_line(buf, 1, &format!("<object id=\"{id}\">"));
        for attr in &object.attributes {
            if !is_element_name(&attr.name) {
                return Err(ExportError::sink(format!(
                    "attribute '{}' of '{}' is not a valid element name",
                    attr.name, object.id
                )));
            }
            self.render_attribute(buf, attr);
        }
        self.push_line(buf, 1, "</object>");
        Ok(())
    }

    fn render_attribute(&self, buf: &mut String, attr: &AttributeNode) {
        let name = &attr.name;
        let kind = attr.payload.kind();
        match &attr.payload {
            AttributePayload::Static { value } => {
                let value = escape(&value.to_string());
                let line = format!("<{name} type=\"{kind}\" value=\"{value}\" />");
                self.push_line(buf, 2, &line);
            }
            AttributePayload::Keyed(curve) => {
                self.push_line(buf, 2, &format!("<{name} type=\"{kind}\">"));
                self.render_curve(buf, curve);
                self.push_line(buf, 2, &format!("</{name}>"));
            }
        }
    }

    fn render_curve(&self, buf: &mut String, curve: &CurvePayload) {
        let inf = &curve.infinity;
        self.push_line(
            buf,
            3,
            &format!(
                "<infinity preInfinity=\"{}\" postInfinity=\"{}\" weightedTangents=\"{}\" />",
                inf.pre_infinity.code(),
                inf.post_infinity.code(),
                bool_text(inf.weighted_tangents),
            ),
        );
        for k in &curve.keys {
            self.push_line(
                buf,
                3,
                &format!(
                    "<key breakdown=\"{}\" inAngle=\"{}\" inTangentType=\"{}\" inWeight=\"{}\" \
                     key=\"{}\" lock=\"{}\" outAngle=\"{}\" outTangentType=\"{}\" \
                     outWeight=\"{}\" value=\"{}\" weightLock=\"{}\" />",
                    k.breakdown_code(),
                    real_text(k.in_angle),
                    k.in_tangent_type.as_str(),
                    real_text(k.in_weight),
                    real_text(k.time),
                    bool_text(k.tangent_lock),
                    real_text(k.out_angle),
                    k.out_tangent_type.as_str(),
                    real_text(k.out_weight),
                    real_text(k.value),
                    bool_text(k.weight_lock),
                ),
            );
        }
    }
}

impl XmlSink<BufWriter<File>> {
    /// Create (or replace) the output file and wrap it.
    pub fn create(file: &FileSinkOpts, opts: XmlSinkOpts) -> ExportResult<Self> {
        Ok(Self::new(open_output(file)?, opts))
    }
}

impl<W: Write> DocumentSink for XmlSink<W> {
    fn begin(&mut self) -> ExportResult<()> {
        if self.state != State::Idle {
            return Err(ExportError::sink("xml sink already begun"));
        }
        let head = if self.opts.declaration {
            format!(
                "<?xml version=\"1.0\" encoding=\"utf-8\"?>{}<Data",
                self.opts.newline
            )
        } else {
            "<Data".to_string()
        };
        self.emit(&head, State::RootPending)
    }

    fn write_object(&mut self, object: &ObjectNode) -> ExportResult<()> {
        let mut fragment = String::new();
        match self.state {
            State::RootPending => fragment.push('>'),
            State::RootOpen => {}
            State::Poisoned => {
                return Err(ExportError::sink("xml output is incomplete after a failed write"));
            }
            State::Idle | State::Finished => {
                return Err(ExportError::sink("xml sink is not accepting objects"));
            }
        }
        self.render_object(&mut fragment, object)?;
        self.emit(&fragment, State::RootOpen)
    }

    fn finish(&mut self) -> ExportResult<()> {
        let tail = match self.state {
            State::RootPending => " />".to_string(),
            State::RootOpen => format!("{}</Data>", self.opts.newline),
            State::Idle | State::Finished => return Ok(()),
            State::Poisoned => {
                return Err(ExportError::sink("xml output is incomplete after a failed write"));
            }
        };
        self.emit(&tail, State::Finished)?;
        self.out()?.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for XmlSink<W> {
    fn drop(&mut self) {
        if self.out.is_some()
            && let Err(e) = self.finish()
        {
            tracing::warn!("closing xml output failed: {e}");
        }
    }
}

/// Escape text for use inside a double-quoted markup attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/document/xml.rs"]
mod tests;
