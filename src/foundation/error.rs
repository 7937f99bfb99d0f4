/// Convenience result type used across the exporter.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for reads against the host scene.
pub type HostResult<T> = Result<T, HostError>;

/// Top-level error taxonomy returned by export entry points.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// The host scene could not be queried at a point where no recovery is possible
    /// (e.g. enumerating the active selection).
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// The output sink could not be acquired.
    #[error("sink error: {0}")]
    Sink(String),

    /// Writing to an already acquired sink failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExportError {
    /// Build an [`ExportError::Sink`] value.
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Build an [`ExportError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Failure reported by the host while reading scene data.
///
/// These are recoverable at the attribute boundary: the exporter logs them and moves on.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// The referenced object does not exist in the scene.
    #[error("no such object '{0}'")]
    MissingObject(String),

    /// The referenced attribute or plug does not exist on the object.
    #[error("no such attribute '{plug}' on '{object}'")]
    MissingAttribute {
        /// Object path.
        object: String,
        /// Plug name or attribute index.
        plug: String,
    },

    /// The referenced animation curve does not exist.
    #[error("no such animation curve #{0}")]
    MissingCurve(usize),

    /// A keyframe index was outside the curve's key range.
    #[error("key index {index} out of range (curve has {count} keys)")]
    KeyOutOfRange {
        /// Requested key index.
        index: usize,
        /// Number of keys on the curve.
        count: usize,
    },

    /// A plug name did not have the `object.attribute` form.
    #[error("malformed plug name '{0}'")]
    MalformedPlug(String),

    /// The stored value could not be read as the requested type.
    #[error("plug '{plug}' cannot be read as {expected}")]
    TypeMismatch {
        /// Plug name.
        plug: String,
        /// Requested value type.
        expected: &'static str,
    },

    /// Any other host-side read failure.
    #[error("host read failed: {0}")]
    Read(String),
}

impl HostError {
    /// Build a [`HostError::Read`] value.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
