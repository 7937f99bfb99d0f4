//! Read-only contract between the exporter and a host scene.
//!
//! The exporter never reaches for ambient host state: every query goes through a
//! [`SceneAccess`] handle passed into [`crate::export_selection`]. Real host bindings implement
//! these traits; [`crate::MemoryScene`] implements them over plain data.

use crate::foundation::error::HostResult;

/// Stable, host-provided identifier of a selected object (e.g. a full DAG path).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ObjectPath(pub String);

impl ObjectPath {
    /// Create a path from any string-like value.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Borrow the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to an animation curve owned by the host.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct CurveId(pub usize);

/// Semantic type of an attribute as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// Generic numeric attribute; see [`NumericType`] for the storage type.
    Numeric(NumericType),
    /// Real-valued distance in scene linear units.
    DoubleLinear,
    /// Real-valued angle, stored in radians.
    DoubleAngle,
    /// Enumerated integer.
    Enum,
    /// Anything else (compound, message, string, matrix...).
    #[serde(other)]
    Other,
}

/// Storage type of a [`AttributeType::Numeric`] attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericType {
    /// Boolean flag.
    Boolean,
    /// 32-bit integer.
    Long,
    /// Double-precision real.
    Double,
    /// Other numeric storage (short, byte, float, pairs...).
    #[serde(other)]
    Other,
}

/// Per-attribute metadata returned by [`SceneAccess::attribute`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AttributeInfo {
    /// Dotted plug name, `object.attribute`.
    pub plug: String,
    /// Driven by an incoming connection other than an animation curve.
    pub connected: bool,
    /// Exposed by the host as keyable.
    pub keyable: bool,
    /// Semantic type.
    pub ty: AttributeType,
}

/// Extrapolation behavior before the first / after the last key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostInfinity {
    /// Hold the end key value.
    Constant,
    /// Continue along the end tangent.
    Linear,
    /// Repeat the curve.
    Cycle,
    /// Repeat the curve, offsetting each cycle by the value delta.
    CycleRelative,
    /// Repeat the curve back and forth.
    Oscillate,
    /// A host value this exporter does not know.
    #[serde(other)]
    Unknown,
}

/// Interpolation rule on one side of a keyframe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostTangent {
    /// Automatic tangents.
    Auto,
    /// Fixed tangent.
    Fixed,
    /// Use the global default.
    Global,
    /// Linear toward the neighbour key.
    Linear,
    /// Zero slope.
    Flat,
    /// Smooth spline.
    Smooth,
    /// Hold until the next key.
    Step,
    /// Spline clamped to avoid overshoot.
    Clamped,
    /// Plateau spline.
    Plateau,
    /// Jump to the next key value immediately.
    StepNext,
    /// A host value this exporter does not know.
    #[serde(other)]
    Unknown,
}

/// Which side of a key a tangent query refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TangentSide {
    /// Incoming tangent.
    In,
    /// Outgoing tangent.
    Out,
}

/// Per-key data returned by [`AnimCurve::key`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostKey {
    /// Key time in seconds.
    pub time: f64,
    /// Raw stored value (radians for angular curves).
    pub value: f64,
    /// Breakdown key.
    #[serde(default)]
    pub breakdown: bool,
    /// In and out tangents are locked together.
    #[serde(default)]
    pub tangents_locked: bool,
    /// In and out tangent weights are locked together.
    #[serde(default)]
    pub weights_locked: bool,
    /// Incoming tangent type.
    pub in_tangent: HostTangent,
    /// Outgoing tangent type.
    pub out_tangent: HostTangent,
}

/// Tangent geometry returned by [`AnimCurve::tangent`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostTangentValue {
    /// Tangent angle in degrees.
    pub angle_deg: f64,
    /// Tangent weight magnitude.
    pub weight: f64,
}

/// Binding of an animation curve to the plug it drives.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimatedPlug {
    /// Dotted plug name, `object.attribute`.
    pub plug: String,
    /// Curve driving the plug.
    pub curve: CurveId,
}

/// Read access to one animation curve.
///
/// Keys are indexed `0..key_count()` in ascending time order.
pub trait AnimCurve {
    /// Extrapolation before the first key.
    fn pre_infinity(&self) -> HostInfinity;
    /// Extrapolation after the last key.
    fn post_infinity(&self) -> HostInfinity;
    /// Whether the curve uses weighted tangents.
    fn is_weighted(&self) -> bool;
    /// Number of keys on the curve.
    fn key_count(&self) -> usize;
    /// Read one key.
    fn key(&self, index: usize) -> HostResult<HostKey>;
    /// Read one side of a key's tangent.
    fn tangent(&self, index: usize, side: TangentSide) -> HostResult<HostTangentValue>;
}

/// Read access to a host scene for the duration of one export.
pub trait SceneAccess {
    /// Active selection, in host order. Duplicates are preserved.
    fn active_selection(&self) -> HostResult<Vec<ObjectPath>>;

    /// Number of attributes on an object.
    fn attribute_count(&self, object: &ObjectPath) -> HostResult<usize>;
    /// Metadata of the attribute at `index` in the host's attribute table.
    fn attribute(&self, object: &ObjectPath, index: usize) -> HostResult<AttributeInfo>;

    /// Current value of a plug read as a boolean.
    fn read_bool(&self, object: &ObjectPath, plug: &str) -> HostResult<bool>;
    /// Current value of a plug read as an integer.
    fn read_int(&self, object: &ObjectPath, plug: &str) -> HostResult<i32>;
    /// Current value of a plug read as a double, in internal units.
    fn read_double(&self, object: &ObjectPath, plug: &str) -> HostResult<f64>;

    /// Whether any animation curve drives the object.
    fn is_animated(&self, object: &ObjectPath) -> HostResult<bool>;
    /// Curves driving plugs of the object.
    fn animated_plugs(&self, object: &ObjectPath) -> HostResult<Vec<AnimatedPlug>>;
    /// Resolve a curve handle.
    fn curve(&self, id: CurveId) -> HostResult<&dyn AnimCurve>;
}

/// Attribute name from a dotted plug name: the component right after the first `.`.
///
/// `"pCube1.rotateX"` yields `"rotateX"`, `"pCube1.translate.x"` yields `"translate"`.
pub fn attribute_name(plug: &str) -> Option<&str> {
    let rest = plug.split_once('.')?.1;
    let name = rest.split('.').next().unwrap_or(rest);
    if name.is_empty() { None } else { Some(name) }
}

#[cfg(test)]
#[path = "../../tests/unit/host/access.rs"]
mod tests;
