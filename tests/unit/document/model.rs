use super::*;

#[test]
fn infinity_codes_round_trip_through_u8() {
    for code in [
        InfinityCode::Constant,
        InfinityCode::Linear,
        InfinityCode::Cycle,
        InfinityCode::CycleRelative,
        InfinityCode::Other,
    ] {
        assert_eq!(InfinityCode::try_from(u8::from(code)), Ok(code));
    }
    assert!(InfinityCode::try_from(2).is_err());
    assert!(InfinityCode::try_from(6).is_err());
}

#[test]
fn tangent_tag_serde_matches_text() {
    for tag in [TangentTag::StepNext, TangentTag::Clamped, TangentTag::Auto] {
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, format!("\"{}\"", tag.as_str()));
    }
}

#[test]
fn static_values_format_canonically() {
    assert_eq!(StaticValue::Bool(true).to_string(), "True");
    assert_eq!(StaticValue::Bool(false).to_string(), "False");
    assert_eq!(StaticValue::Int(-3).to_string(), "-3");
    assert_eq!(StaticValue::Real(90.0).to_string(), "90");
    assert_eq!(StaticValue::Real(1.25).to_string(), "1.25");
}

#[test]
fn extreme_reals_use_exponent_form() {
    assert_eq!(StaticValue::Real(1e-300).to_string(), "1e-300");
    assert_eq!(StaticValue::Real(-2.5e20).to_string(), "-2.5e20");
    assert_eq!(real_text(0.0001), "0.0001");
    assert_eq!(real_text(0.00001), "1e-5");
    assert_eq!(real_text(123456.75), "123456.75");
    assert_eq!(real_text(-0.0), "-0");

    let text = real_text(1e-300);
    assert_eq!(text.parse::<f64>().unwrap(), 1e-300);
}

#[test]
fn element_names_are_checked() {
    assert!(is_element_name("rotateX"));
    assert!(is_element_name("_private"));
    assert!(is_element_name("my-attr2"));
    assert!(!is_element_name(""));
    assert!(!is_element_name("2d"));
    assert!(!is_element_name("has space"));
    assert!(!is_element_name("a<b"));
    assert!(!is_element_name("ns:attr"));
}

#[test]
fn key_record_breakdown_serializes_as_digit() {
    let rec = KeyRecord {
        time: 1.0,
        value: 2.0,
        breakdown: true,
        tangent_lock: true,
        weight_lock: false,
        in_tangent_type: TangentTag::Auto,
        out_tangent_type: TangentTag::Step,
        in_angle: 0.0,
        out_angle: 0.0,
        in_weight: 1.0,
        out_weight: 1.0,
    };
    assert_eq!(rec.breakdown_code(), 1);
    let v = serde_json::to_value(rec).unwrap();
    assert_eq!(v["breakdown"], serde_json::json!(1));
    assert_eq!(v["out_tangent_type"], serde_json::json!("step"));

    let back: KeyRecord = serde_json::from_value(v).unwrap();
    assert_eq!(back, rec);
}

#[test]
fn payload_kind_tags() {
    let s = AttributePayload::Static {
        value: StaticValue::Int(1),
    };
    assert_eq!(s.kind(), "static");
    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(v, serde_json::json!({ "type": "static", "value": 1 }));

    let k = AttributePayload::Keyed(CurvePayload {
        infinity: InfinityDescriptor {
            pre_infinity: InfinityCode::Linear,
            post_infinity: InfinityCode::Cycle,
            weighted_tangents: false,
        },
        keys: vec![],
    });
    assert_eq!(k.kind(), "keyed");
    let v = serde_json::to_value(&k).unwrap();
    assert_eq!(v["type"], serde_json::json!("keyed"));
    assert_eq!(v["infinity"]["post_infinity"], serde_json::json!(3));
}
