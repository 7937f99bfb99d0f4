use super::*;
use crate::host::memory::{HostValue, MemoryAttribute, MemoryObject, MemoryScene};

fn info(plug: &str, ty: AttributeType) -> AttributeInfo {
    AttributeInfo {
        plug: plug.to_string(),
        connected: false,
        keyable: true,
        ty,
    }
}

fn exported(plug: &str, name: &str) -> ExportedAttribute {
    ExportedAttribute {
        plug: plug.to_string(),
        name: name.to_string(),
    }
}

fn bindings(plug: &str, curve: usize) -> CurveBindings {
    CurveBindings::from(vec![AnimatedPlug {
        plug: plug.to_string(),
        curve: CurveId(curve),
    }])
}

#[test]
fn connected_and_non_keyable_are_skipped() {
    let mut a = info("c.translateX", AttributeType::DoubleLinear);
    a.connected = true;
    assert_eq!(
        classify_info(&a, &CurveBindings::none()).unwrap(),
        Classification::Skip(SkipReason::Connected)
    );

    let mut a = info("c.translateX", AttributeType::DoubleLinear);
    a.keyable = false;
    assert_eq!(
        classify_info(&a, &CurveBindings::none()).unwrap(),
        Classification::Skip(SkipReason::NotKeyable)
    );
}

#[test]
fn connection_check_precedes_curve_lookup() {
    let mut a = info("c.rotateX", AttributeType::DoubleAngle);
    a.connected = true;
    assert_eq!(
        classify_info(&a, &bindings("c.rotateX", 0)).unwrap(),
        Classification::Skip(SkipReason::Connected)
    );
}

#[test]
fn bound_attributes_are_animated() {
    let a = info("c.rotateX", AttributeType::DoubleAngle);
    assert_eq!(
        classify_info(&a, &bindings("c.rotateX", 4)).unwrap(),
        Classification::Animated(exported("c.rotateX", "rotateX"), CurveId(4))
    );
    // A curve on a different plug does not count.
    assert_eq!(
        classify_info(&a, &bindings("c.rotateY", 4)).unwrap(),
        Classification::Static(exported("c.rotateX", "rotateX"), StaticKind::Angle)
    );
}

#[test]
fn animated_takes_any_type() {
    let a = info("c.custom", AttributeType::Numeric(NumericType::Other));
    assert!(matches!(
        classify_info(&a, &bindings("c.custom", 0)).unwrap(),
        Classification::Animated(..)
    ));
}

#[test]
fn static_types_map_to_kinds() {
    let cases = [
        (AttributeType::Numeric(NumericType::Boolean), Some(StaticKind::Boolean)),
        (AttributeType::Numeric(NumericType::Long), Some(StaticKind::Integer)),
        (AttributeType::Numeric(NumericType::Double), Some(StaticKind::Real)),
        (AttributeType::Numeric(NumericType::Other), None),
        (AttributeType::DoubleLinear, Some(StaticKind::Linear)),
        (AttributeType::DoubleAngle, Some(StaticKind::Angle)),
        (AttributeType::Enum, Some(StaticKind::Enum)),
        (AttributeType::Other, None),
    ];
    for (ty, kind) in cases {
        assert_eq!(static_kind(ty), kind, "{ty:?}");
    }

    let a = info("c.message", AttributeType::Other);
    assert_eq!(
        classify_info(&a, &CurveBindings::none()).unwrap(),
        Classification::Skip(SkipReason::UnsupportedType)
    );
}

#[test]
fn malformed_plug_fails_only_when_exportable() {
    let a = info("noattr", AttributeType::Enum);
    assert_eq!(
        classify_info(&a, &CurveBindings::none()),
        Err(HostError::MalformedPlug("noattr".to_string()))
    );

    let mut a = info("noattr", AttributeType::Enum);
    a.keyable = false;
    assert!(classify_info(&a, &CurveBindings::none()).is_ok());
}

#[test]
fn names_unusable_as_elements_are_malformed() {
    for plug in ["obj.has space", "obj.a<b", "obj.2d"] {
        let a = info(plug, AttributeType::DoubleLinear);
        assert_eq!(
            classify_info(&a, &CurveBindings::none()),
            Err(HostError::MalformedPlug(plug.to_string()))
        );
    }
    let a = info("obj.has space", AttributeType::DoubleLinear);
    assert_eq!(
        classify_info(&a, &bindings("obj.has space", 0)),
        Err(HostError::MalformedPlug("obj.has space".to_string()))
    );
}

#[test]
fn bindings_are_only_queried_for_animated_objects() {
    let mut scene = MemoryScene::new();
    let still = scene.add_object(
        "|still",
        MemoryObject::new("still").attr("tx", AttributeType::DoubleLinear, HostValue::Double(1.0)),
    );
    assert!(CurveBindings::of(&scene, &still).unwrap().is_empty());

    let ghost = ObjectPath::new("|ghost");
    assert!(CurveBindings::of(&scene, &ghost).is_err());
}

#[test]
fn classify_reads_through_the_scene() {
    let mut scene = MemoryScene::new();
    let path = scene.add_object(
        "|c",
        MemoryObject::new("c")
            .attr("visibility", AttributeType::Numeric(NumericType::Boolean), HostValue::Bool(true))
            .attribute(
                MemoryAttribute::new("c.worldMatrix", AttributeType::Other, HostValue::Int(0))
                    .not_keyable(),
            ),
    );
    let none = CurveBindings::none();
    assert_eq!(
        classify(&scene, &path, 0, &none).unwrap(),
        Classification::Static(exported("c.visibility", "visibility"), StaticKind::Boolean)
    );
    assert_eq!(
        classify(&scene, &path, 1, &none).unwrap(),
        Classification::Skip(SkipReason::NotKeyable)
    );
    assert!(classify(&scene, &path, 2, &none).is_err());
}
