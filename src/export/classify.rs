use crate::document::model::is_element_name;
use crate::foundation::error::{HostError, HostResult};
use crate::host::access::{
    AnimatedPlug, AttributeInfo, AttributeType, CurveId, NumericType, ObjectPath, SceneAccess,
    attribute_name,
};

/// Static attribute subtype; decides reading, unit conversion and zero suppression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaticKind {
    /// Boolean, always emitted.
    Boolean,
    /// Integer, always emitted.
    Integer,
    /// Real without unit, always emitted.
    Real,
    /// Linear distance, emitted when non-zero.
    Linear,
    /// Angle, converted to degrees and emitted when non-zero.
    Angle,
    /// Enum index, always emitted.
    Enum,
}

/// Why an attribute contributes nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Value comes from an incoming connection.
    Connected,
    /// Not exposed as keyable.
    NotKeyable,
    /// Type outside the exported classes.
    UnsupportedType,
}

/// An exportable attribute, resolved from its plug.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedAttribute {
    /// Dotted plug name used for host reads.
    pub plug: String,
    /// Attribute name written to the document.
    pub name: String,
}

/// Outcome of classifying one attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Contributes nothing.
    Skip(SkipReason),
    /// Current value is exported.
    Static(ExportedAttribute, StaticKind),
    /// Driving curve is exported.
    Animated(ExportedAttribute, CurveId),
}

/// Curve bindings of one object, looked up by plug name.
#[derive(Clone, Debug, Default)]
pub struct CurveBindings {
    plugs: Vec<AnimatedPlug>,
}

impl CurveBindings {
    /// Bindings for an object without animation.
    pub fn none() -> Self {
        Self::default()
    }

    /// Query the host for the curves driving `object`.
    pub fn of<S: SceneAccess + ?Sized>(scene: &S, object: &ObjectPath) -> HostResult<Self> {
        if !scene.is_animated(object)? {
            return Ok(Self::none());
        }
        Ok(Self {
            plugs: scene.animated_plugs(object)?,
        })
    }

    /// Curve driving `plug`, if any. The first binding wins.
    pub fn curve_for(&self, plug: &str) -> Option<CurveId> {
        self.plugs.iter().find(|b| b.plug == plug).map(|b| b.curve)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.plugs.len()
    }

    /// No bindings.
    pub fn is_empty(&self) -> bool {
        self.plugs.is_empty()
    }
}

impl From<Vec<AnimatedPlug>> for CurveBindings {
    fn from(plugs: Vec<AnimatedPlug>) -> Self {
        Self { plugs }
    }
}

/// Read the attribute at `index` and classify it.
pub fn classify<S: SceneAccess + ?Sized>(
    scene: &S,
    object: &ObjectPath,
    index: usize,
    bindings: &CurveBindings,
) -> HostResult<Classification> {
    let info = scene.attribute(object, index)?;
    classify_info(&info, bindings)
}

/// Classify an attribute from its metadata.
///
/// Fails only when an exportable attribute has a plug name without an attribute component, or
/// one whose attribute component cannot name a document element.
pub fn classify_info(info: &AttributeInfo, bindings: &CurveBindings) -> HostResult<Classification> {
    if info.connected {
        return Ok(Classification::Skip(SkipReason::Connected));
    }
    if !info.keyable {
        return Ok(Classification::Skip(SkipReason::NotKeyable));
    }

    let resolve = || -> HostResult<ExportedAttribute> {
        let name = attribute_name(&info.plug)
            .filter(|name| is_element_name(name))
            .ok_or_else(|| HostError::MalformedPlug(info.plug.clone()))?;
        Ok(ExportedAttribute {
            plug: info.plug.clone(),
            name: name.to_string(),
        })
    };

    if let Some(curve) = bindings.curve_for(&info.plug) {
        return Ok(Classification::Animated(resolve()?, curve));
    }

    match static_kind(info.ty) {
        Some(kind) => Ok(Classification::Static(resolve()?, kind)),
        None => Ok(Classification::Skip(SkipReason::UnsupportedType)),
    }
}

/// Static subtype for a host attribute type, `None` when the type is not exported.
pub fn static_kind(ty: AttributeType) -> Option<StaticKind> {
    match ty {
        AttributeType::Numeric(NumericType::Boolean) => Some(StaticKind::Boolean),
        AttributeType::Numeric(NumericType::Long) => Some(StaticKind::Integer),
        AttributeType::Numeric(NumericType::Double) => Some(StaticKind::Real),
        AttributeType::Numeric(NumericType::Other) => None,
        AttributeType::DoubleLinear => Some(StaticKind::Linear),
        AttributeType::DoubleAngle => Some(StaticKind::Angle),
        AttributeType::Enum => Some(StaticKind::Enum),
        AttributeType::Other => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/classify.rs"]
mod tests;
