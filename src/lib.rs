//! Animation export for 3D authoring scenes.
//!
//! The crate reads the animation state of selected scene objects (static attribute values and
//! keyframed curves) through a read-only [`SceneAccess`] handle and streams it as a
//! [`Document`] into a [`DocumentSink`].
//!
//! # Pipeline overview
//!
//! 1. **Select**: the host's active selection, in order, duplicates kept
//! 2. **Classify**: each attribute is skipped, snapshotted, or bound to a curve
//! 3. **Encode**: static values and curves become document nodes, angles in degrees
//! 4. **Write**: one object node at a time into the sink ([`XmlSink`], [`JsonSink`], [`MemorySink`])
//!
//! Export is a single synchronous pass. Attribute read failures are reported in the
//! [`ExportReport`] and never abort the document; only selection and sink failures do.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod export;
mod foundation;

/// Output document model and sinks.
pub mod document;
/// Host scene access contract and in-memory scene.
pub mod host;

pub use crate::document::json::JsonSink;
pub use crate::document::model::{
    AttributeNode, AttributePayload, CurvePayload, Document, InfinityCode, InfinityDescriptor,
    KeyRecord, ObjectNode, StaticValue, TangentTag,
};
pub use crate::document::sink::{DocumentSink, FileSinkOpts, MemorySink, open_output};
pub use crate::document::xml::{XmlSink, XmlSinkOpts};
pub use crate::export::assembler::{export_document, export_selection};
pub use crate::export::classify::{
    Classification, CurveBindings, ExportedAttribute, SkipReason, StaticKind, classify,
    classify_info,
};
pub use crate::export::curve_encoder::{encode_curve, infinity_code, tangent_tag};
pub use crate::export::object::serialize_object;
pub use crate::export::report::{AttributeWarning, ExportReport};
pub use crate::export::static_encoder::encode_static;
pub use crate::foundation::error::{ExportError, ExportResult, HostError, HostResult};
pub use crate::foundation::units::{deg_to_rad, rad_to_deg};
pub use crate::host::access::{
    AnimCurve, AnimatedPlug, AttributeInfo, AttributeType, CurveId, HostInfinity, HostKey,
    HostTangent, HostTangentValue, NumericType, ObjectPath, SceneAccess, TangentSide,
};
pub use crate::host::memory::{
    HostValue, MemoryAttribute, MemoryCurve, MemoryKey, MemoryObject, MemoryScene,
};
