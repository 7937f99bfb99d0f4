use crate::document::model::{CurvePayload, InfinityCode, InfinityDescriptor, KeyRecord, TangentTag};
use crate::foundation::error::HostResult;
use crate::foundation::units::keyed_value;
use crate::host::access::{AnimCurve, HostInfinity, HostTangent, TangentSide};

/// Encode a complete animation curve driving the attribute named `attribute`.
///
/// The payload is fully built before it is returned, so a failing key read drops the curve as a
/// whole. Keys are taken in host index order and never re-sorted.
pub fn encode_curve(attribute: &str, curve: &dyn AnimCurve) -> HostResult<CurvePayload> {
    let infinity = InfinityDescriptor {
        pre_infinity: infinity_code(curve.pre_infinity()),
        post_infinity: infinity_code(curve.post_infinity()),
        weighted_tangents: curve.is_weighted(),
    };

    let count = curve.key_count();
    let mut keys = Vec::with_capacity(count);
    for i in 0..count {
        keys.push(encode_key(attribute, curve, i)?);
    }

    Ok(CurvePayload { infinity, keys })
}

fn encode_key(attribute: &str, curve: &dyn AnimCurve, index: usize) -> HostResult<KeyRecord> {
    let key = curve.key(index)?;
    let tan_in = curve.tangent(index, TangentSide::In)?;
    let tan_out = curve.tangent(index, TangentSide::Out)?;

    Ok(KeyRecord {
        time: key.time,
        value: keyed_value(attribute, key.value),
        breakdown: key.breakdown,
        tangent_lock: key.tangents_locked,
        weight_lock: key.weights_locked,
        in_tangent_type: tangent_tag(key.in_tangent),
        out_tangent_type: tangent_tag(key.out_tangent),
        in_angle: tan_in.angle_deg,
        out_angle: tan_out.angle_deg,
        in_weight: tan_in.weight,
        out_weight: tan_out.weight,
    })
}

/// Map a host infinity type to its document code. Oscillate and unknown types share `5`.
pub fn infinity_code(infinity: HostInfinity) -> InfinityCode {
    match infinity {
        HostInfinity::Constant => InfinityCode::Constant,
        HostInfinity::Linear => InfinityCode::Linear,
        HostInfinity::Cycle => InfinityCode::Cycle,
        HostInfinity::CycleRelative => InfinityCode::CycleRelative,
        HostInfinity::Oscillate | HostInfinity::Unknown => InfinityCode::Other,
    }
}

/// Map a host tangent type to its document tag. Unknown types become `auto`.
pub fn tangent_tag(tangent: HostTangent) -> TangentTag {
    match tangent {
        HostTangent::Auto => TangentTag::Auto,
        HostTangent::Fixed => TangentTag::Fixed,
        HostTangent::Global => TangentTag::Global,
        HostTangent::Linear => TangentTag::Linear,
        HostTangent::Flat => TangentTag::Flat,
        HostTangent::Smooth => TangentTag::Smooth,
        HostTangent::Step => TangentTag::Step,
        HostTangent::Clamped => TangentTag::Clamped,
        HostTangent::Plateau => TangentTag::Plateau,
        HostTangent::StepNext => TangentTag::StepNext,
        HostTangent::Unknown => TangentTag::Auto,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/curve_encoder.rs"]
mod tests;
