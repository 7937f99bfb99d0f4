use crate::document::model::{AttributeNode, AttributePayload, StaticValue};
use crate::export::classify::{ExportedAttribute, StaticKind};
use crate::foundation::error::HostResult;
use crate::foundation::units::rad_to_deg;
use crate::host::access::{ObjectPath, SceneAccess};

/// Snapshot the current value of a static attribute.
///
/// Returns `Ok(None)` when a linear or angular value is zero (after conversion). Booleans,
/// integers, enums and unitless reals are always emitted.
pub fn encode_static<S: SceneAccess + ?Sized>(
    scene: &S,
    object: &ObjectPath,
    attr: &ExportedAttribute,
    kind: StaticKind,
) -> HostResult<Option<AttributeNode>> {
    let plug = attr.plug.as_str();
    let value = match kind {
        StaticKind::Boolean => StaticValue::Bool(scene.read_bool(object, plug)?),
        StaticKind::Integer | StaticKind::Enum => StaticValue::Int(scene.read_int(object, plug)?),
        StaticKind::Real => StaticValue::Real(scene.read_double(object, plug)?),
        StaticKind::Linear => {
            let v = scene.read_double(object, plug)?;
            if v == 0.0 {
                return Ok(None);
            }
            StaticValue::Real(v)
        }
        StaticKind::Angle => {
            let v = rad_to_deg(scene.read_double(object, plug)?);
            if v == 0.0 {
                return Ok(None);
            }
            StaticValue::Real(v)
        }
    };

    Ok(Some(AttributeNode {
        name: attr.name.clone(),
        payload: AttributePayload::Static { value },
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/export/static_encoder.rs"]
mod tests;
