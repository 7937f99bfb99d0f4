#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Exported animation document.
///
/// Objects appear in selection order; a selection naming the same object twice yields two
/// entries. An empty selection yields an empty, valid document.
pub struct Document {
    /// Exported objects.
    pub objects: Vec<ObjectNode>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One exported object.
pub struct ObjectNode {
    /// Host path of the object.
    pub id: String,
    /// Exported attributes, in host enumeration order.
    pub attributes: Vec<AttributeNode>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One exported attribute.
pub struct AttributeNode {
    /// Attribute name (plug name without the object prefix).
    pub name: String,
    /// Static snapshot or keyed curve.
    pub payload: AttributePayload,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Kind-specific attribute payload.
pub enum AttributePayload {
    /// Current value of a non-animated attribute.
    Static {
        /// Converted value.
        value: StaticValue,
    },
    /// Animation curve driving the attribute.
    Keyed(CurvePayload),
}

impl AttributePayload {
    /// Kind tag as written in documents (`static` / `keyed`).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Static { .. } => "static",
            Self::Keyed(_) => "keyed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Static attribute value.
pub enum StaticValue {
    /// Boolean.
    Bool(bool),
    /// Integer or enum index.
    Int(i32),
    /// Real, already unit-converted.
    Real(f64),
}

impl std::fmt::Display for StaticValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => f.write_str(bool_text(*v)),
            Self::Int(v) => write!(f, "{v}"),
            Self::Real(v) => f.write_str(&real_text(*v)),
        }
    }
}

/// Canonical text of a boolean flag in documents.
pub fn bool_text(v: bool) -> &'static str {
    if v { "True" } else { "False" }
}

/// Canonical text of a real: shortest round-trip digits, without a trailing `.0`.
///
/// Magnitudes below `1e-4` or from `1e16` up switch to exponent form (`1e-300`, `2.5e20`), the
/// same cut-offs `f64`'s `Debug` uses.
pub fn real_text(v: f64) -> String {
    let mag = v.abs();
    if v != 0.0 && v.is_finite() && !(1e-4..1e16).contains(&mag) {
        format!("{v:e}")
    } else {
        format!("{v}")
    }
}

/// Whether `name` can be written as a markup element name.
///
/// Accepts a letter or `_` followed by letters, digits, `_` or `-`.
pub fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Encoded animation curve.
pub struct CurvePayload {
    /// Extrapolation and weighting.
    pub infinity: InfinityDescriptor,
    /// Keys in host index order.
    pub keys: Vec<KeyRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Curve extrapolation codes and weighted-tangent flag.
pub struct InfinityDescriptor {
    /// Pre-infinity code.
    pub pre_infinity: InfinityCode,
    /// Post-infinity code.
    pub post_infinity: InfinityCode,
    /// Weighted tangents.
    pub weighted_tangents: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(into = "u8", try_from = "u8")]
/// Numeric extrapolation code written to documents.
///
/// Codes are `0, 1, 3, 4, 5`; `2` is unassigned and never produced.
pub enum InfinityCode {
    /// `0`
    Constant,
    /// `1`
    Linear,
    /// `3`
    Cycle,
    /// `4`
    CycleRelative,
    /// `5`: oscillate and anything unrecognized.
    Other,
}

impl InfinityCode {
    /// Numeric value written to documents.
    pub fn code(self) -> u8 {
        match self {
            Self::Constant => 0,
            Self::Linear => 1,
            Self::Cycle => 3,
            Self::CycleRelative => 4,
            Self::Other => 5,
        }
    }
}

impl From<InfinityCode> for u8 {
    fn from(c: InfinityCode) -> Self {
        c.code()
    }
}

impl TryFrom<u8> for InfinityCode {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Constant),
            1 => Ok(Self::Linear),
            3 => Ok(Self::Cycle),
            4 => Ok(Self::CycleRelative),
            5 => Ok(Self::Other),
            other => Err(format!("invalid infinity code {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Tangent type tag written to documents.
pub enum TangentTag {
    /// `auto`
    Auto,
    /// `fixed`
    Fixed,
    /// `global`
    Global,
    /// `linear`
    Linear,
    /// `flat`
    Flat,
    /// `smooth`
    Smooth,
    /// `step`
    Step,
    /// `clamped`
    Clamped,
    /// `plateau`
    Plateau,
    /// `stepnext`
    StepNext,
}

impl TangentTag {
    /// Tag text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Fixed => "fixed",
            Self::Global => "global",
            Self::Linear => "linear",
            Self::Flat => "flat",
            Self::Smooth => "smooth",
            Self::Step => "step",
            Self::Clamped => "clamped",
            Self::Plateau => "plateau",
            Self::StepNext => "stepnext",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One encoded keyframe.
pub struct KeyRecord {
    /// Key time in seconds.
    pub time: f64,
    /// Key value, unit-converted.
    pub value: f64,
    /// Breakdown key.
    #[serde(with = "breakdown_flag")]
    pub breakdown: bool,
    /// Tangents locked.
    pub tangent_lock: bool,
    /// Weights locked.
    pub weight_lock: bool,
    /// Incoming tangent type.
    pub in_tangent_type: TangentTag,
    /// Outgoing tangent type.
    pub out_tangent_type: TangentTag,
    /// Incoming tangent angle, degrees.
    pub in_angle: f64,
    /// Outgoing tangent angle, degrees.
    pub out_angle: f64,
    /// Incoming tangent weight.
    pub in_weight: f64,
    /// Outgoing tangent weight.
    pub out_weight: f64,
}

impl KeyRecord {
    /// Breakdown flag as written to documents (`1` / `0`).
    pub fn breakdown_code(&self) -> u8 {
        u8::from(self.breakdown)
    }
}

mod breakdown_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*v))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match u8::deserialize(d)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(serde::de::Error::custom(format!(
                "breakdown flag must be 0 or 1, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
