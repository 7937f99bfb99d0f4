use crate::document::model::{AttributeNode, AttributePayload, ObjectNode};
use crate::export::classify::{Classification, CurveBindings, classify};
use crate::export::curve_encoder::encode_curve;
use crate::export::report::ExportReport;
use crate::export::static_encoder::encode_static;
use crate::foundation::error::HostResult;
use crate::host::access::{ObjectPath, SceneAccess};

/// Serialize every exportable attribute of one object.
///
/// Attributes are visited once, in host order. A failing attribute is recorded in `report` and
/// left out; its siblings are still exported. If the attribute table or the curve bindings cannot
/// be read at all, the object is emitted without attributes.
#[tracing::instrument(skip_all, fields(object = %object))]
pub fn serialize_object<S: SceneAccess + ?Sized>(
    scene: &S,
    object: &ObjectPath,
    report: &mut ExportReport,
) -> ObjectNode {
    let mut node = ObjectNode {
        id: object.0.clone(),
        attributes: Vec::new(),
    };

    let (count, bindings) = match object_tables(scene, object) {
        Ok(tables) => tables,
        Err(e) => {
            report.warn(object.as_str(), "", &e);
            return node;
        }
    };

    for index in 0..count {
        match export_attribute(scene, object, index, &bindings) {
            Ok(Some(attr)) => {
                match attr.payload {
                    AttributePayload::Static { .. } => report.static_attributes += 1,
                    AttributePayload::Keyed(_) => report.keyed_attributes += 1,
                }
                node.attributes.push(attr);
            }
            Ok(None) => {}
            Err(e) => {
                let plug = scene
                    .attribute(object, index)
                    .map(|info| info.plug)
                    .unwrap_or_else(|_| format!("#{index}"));
                report.warn(object.as_str(), plug, &e);
            }
        }
    }

    tracing::debug!(
        attributes = node.attributes.len(),
        of = count,
        "object serialized"
    );
    node
}

fn object_tables<S: SceneAccess + ?Sized>(
    scene: &S,
    object: &ObjectPath,
) -> HostResult<(usize, CurveBindings)> {
    let count = scene.attribute_count(object)?;
    let bindings = CurveBindings::of(scene, object)?;
    Ok((count, bindings))
}

fn export_attribute<S: SceneAccess + ?Sized>(
    scene: &S,
    object: &ObjectPath,
    index: usize,
    bindings: &CurveBindings,
) -> HostResult<Option<AttributeNode>> {
    match classify(scene, object, index, bindings)? {
        Classification::Skip(reason) => {
            tracing::trace!(index, ?reason, "attribute skipped");
            Ok(None)
        }
        Classification::Static(attr, kind) => encode_static(scene, object, &attr, kind),
        Classification::Animated(attr, curve) => {
            let payload = encode_curve(&attr.name, scene.curve(curve)?)?;
            Ok(Some(AttributeNode {
                name: attr.name,
                payload: AttributePayload::Keyed(payload),
            }))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/object.rs"]
mod tests;
