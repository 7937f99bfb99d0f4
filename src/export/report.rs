use crate::foundation::error::HostError;

/// A recoverable failure observed during export.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AttributeWarning {
    /// Object path.
    pub object: String,
    /// Plug name, or `#<index>` when the plug could not be read, or empty for object-level
    /// failures.
    pub attribute: String,
    /// Error text.
    pub message: String,
}

/// Summary of one export call.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ExportReport {
    /// Object nodes written.
    pub objects: usize,
    /// Static attribute nodes written.
    pub static_attributes: usize,
    /// Keyed attribute nodes written.
    pub keyed_attributes: usize,
    /// Attributes or objects that could not be read.
    pub warnings: Vec<AttributeWarning>,
}

impl ExportReport {
    /// Record a failure and log it.
    pub fn warn(&mut self, object: &str, attribute: impl Into<String>, err: &HostError) {
        let attribute = attribute.into();
        tracing::warn!(object, attribute = attribute.as_str(), "skipping: {err}");
        self.warnings.push(AttributeWarning {
            object: object.to_string(),
            attribute,
            message: err.to_string(),
        });
    }

    /// Whether every read succeeded.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
