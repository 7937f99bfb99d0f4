use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{ExportError, ExportResult, HostError, HostResult};
use crate::host::access::{
    AnimCurve, AnimatedPlug, AttributeInfo, AttributeType, CurveId, HostInfinity, HostKey,
    HostTangentValue, ObjectPath, SceneAccess, TangentSide,
};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// A host scene held entirely in memory.
///
/// `MemoryScene` implements [`SceneAccess`] over plain data. It can be:
/// - built programmatically (tests, embedding)
/// - loaded from a JSON scene snapshot (see [`MemoryScene::from_path`])
pub struct MemoryScene {
    /// Active selection, in order. May repeat paths.
    #[serde(default)]
    pub selection: Vec<ObjectPath>,
    /// Objects keyed by path.
    #[serde(default)]
    pub objects: BTreeMap<ObjectPath, MemoryObject>,
    /// Curve table indexed by [`CurveId`].
    #[serde(default)]
    pub curves: Vec<MemoryCurve>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// One object and its attribute table.
pub struct MemoryObject {
    /// Short node name used to prefix plug names.
    #[serde(default)]
    pub name: String,
    /// Attributes in host enumeration order.
    #[serde(default)]
    pub attributes: Vec<MemoryAttribute>,
    /// Curve bindings.
    #[serde(default)]
    pub animated: Vec<AnimatedPlug>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One attribute with its metadata and current value.
pub struct MemoryAttribute {
    /// Dotted plug name, `object.attribute`.
    pub plug: String,
    /// Driven by a non-curve connection.
    #[serde(default)]
    pub connected: bool,
    /// Keyable flag.
    #[serde(default = "default_keyable")]
    pub keyable: bool,
    /// Semantic type.
    pub ty: AttributeType,
    /// Current value in internal units (radians for angles).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<HostValue>,
    /// When set, every value read on this plug fails with this message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_error: Option<String>,
}

fn default_keyable() -> bool {
    true
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Stored attribute value.
pub enum HostValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Real value.
    Double(f64),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// An animation curve held in memory.
pub struct MemoryCurve {
    /// Extrapolation before the first key.
    pub pre_infinity: HostInfinity,
    /// Extrapolation after the last key.
    pub post_infinity: HostInfinity,
    /// Weighted tangents.
    #[serde(default)]
    pub weighted: bool,
    /// Keys sorted by time.
    #[serde(default)]
    pub keys: Vec<MemoryKey>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A key plus its tangent geometry.
pub struct MemoryKey {
    /// Key data.
    #[serde(flatten)]
    pub key: HostKey,
    /// In-tangent angle in degrees.
    #[serde(default)]
    pub in_angle: f64,
    /// In-tangent weight.
    #[serde(default = "default_weight")]
    pub in_weight: f64,
    /// Out-tangent angle in degrees.
    #[serde(default)]
    pub out_angle: f64,
    /// Out-tangent weight.
    #[serde(default = "default_weight")]
    pub out_weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl MemoryScene {
    /// Create an empty scene with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a scene snapshot from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ExportResult<Self> {
        let scene: MemoryScene = serde_json::from_reader(r)
            .map_err(|e| ExportError::serde(format!("parse scene JSON: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Parse a scene snapshot from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ExportResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("open scene JSON '{}': {e}", path.display()),
            )
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check internal references: curve bindings must resolve and keys must be time-ordered.
    pub fn validate(&self) -> ExportResult<()> {
        for (path, obj) in &self.objects {
            for binding in &obj.animated {
                if binding.curve.0 >= self.curves.len() {
                    return Err(ExportError::serde(format!(
                        "object '{path}' binds '{}' to missing curve #{}",
                        binding.plug, binding.curve.0
                    )));
                }
            }
        }
        for (i, curve) in self.curves.iter().enumerate() {
            if !curve.keys.windows(2).all(|w| w[0].key.time <= w[1].key.time) {
                return Err(ExportError::serde(format!(
                    "curve #{i} keys must be sorted by time"
                )));
            }
        }
        Ok(())
    }

    /// Insert (or replace) an object.
    pub fn add_object(&mut self, path: impl Into<String>, object: MemoryObject) -> ObjectPath {
        let path = ObjectPath::new(path);
        self.objects.insert(path.clone(), object);
        path
    }

    /// Append a curve to the curve table.
    pub fn add_curve(&mut self, curve: MemoryCurve) -> CurveId {
        self.curves.push(curve);
        CurveId(self.curves.len() - 1)
    }

    /// Append a path to the active selection.
    pub fn select(&mut self, path: impl Into<String>) {
        self.selection.push(ObjectPath::new(path));
    }

    fn object(&self, path: &ObjectPath) -> HostResult<&MemoryObject> {
        self.objects
            .get(path)
            .ok_or_else(|| HostError::MissingObject(path.0.clone()))
    }

    fn value(&self, object: &ObjectPath, plug: &str) -> HostResult<HostValue> {
        let attr = self
            .object(object)?
            .attributes
            .iter()
            .find(|a| a.plug == plug)
            .ok_or_else(|| HostError::MissingAttribute {
                object: object.0.clone(),
                plug: plug.to_string(),
            })?;
        if let Some(msg) = &attr.read_error {
            return Err(HostError::read(msg.clone()));
        }
        attr.value
            .ok_or_else(|| HostError::read(format!("plug '{plug}' has no value")))
    }
}

impl MemoryObject {
    /// Create an object whose plugs are prefixed with `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a keyable, unconnected attribute named `attr`.
    pub fn attr(self, attr: &str, ty: AttributeType, value: HostValue) -> Self {
        let plug = format!("{}.{attr}", self.name);
        self.attribute(MemoryAttribute::new(plug, ty, value))
    }

    /// Add a fully specified attribute.
    pub fn attribute(mut self, attribute: MemoryAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Bind `curve` to the attribute named `attr`.
    pub fn animated(mut self, attr: &str, curve: CurveId) -> Self {
        let plug = format!("{}.{attr}", self.name);
        self.animated.push(AnimatedPlug { plug, curve });
        self
    }
}

impl MemoryAttribute {
    /// A keyable, unconnected attribute.
    pub fn new(plug: impl Into<String>, ty: AttributeType, value: HostValue) -> Self {
        Self {
            plug: plug.into(),
            connected: false,
            keyable: true,
            ty,
            value: Some(value),
            read_error: None,
        }
    }

    /// Mark the attribute as driven by an incoming connection.
    pub fn connected(mut self) -> Self {
        self.connected = true;
        self
    }

    /// Mark the attribute as non-keyable.
    pub fn not_keyable(mut self) -> Self {
        self.keyable = false;
        self
    }

    /// Make every value read on this attribute fail.
    pub fn failing(mut self, msg: impl Into<String>) -> Self {
        self.read_error = Some(msg.into());
        self
    }
}

impl MemoryCurve {
    /// Create a curve without keys.
    pub fn new(pre_infinity: HostInfinity, post_infinity: HostInfinity) -> Self {
        Self {
            pre_infinity,
            post_infinity,
            weighted: false,
            keys: Vec::new(),
        }
    }

    /// Set the weighted-tangent flag.
    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Append a key with flat zero-angle, unit-weight tangents.
    pub fn key(self, key: HostKey) -> Self {
        self.key_with_tangents(
            key,
            HostTangentValue {
                angle_deg: 0.0,
                weight: 1.0,
            },
            HostTangentValue {
                angle_deg: 0.0,
                weight: 1.0,
            },
        )
    }

    /// Append a key with explicit tangent geometry.
    pub fn key_with_tangents(
        mut self,
        key: HostKey,
        in_tangent: HostTangentValue,
        out_tangent: HostTangentValue,
    ) -> Self {
        self.keys.push(MemoryKey {
            key,
            in_angle: in_tangent.angle_deg,
            in_weight: in_tangent.weight,
            out_angle: out_tangent.angle_deg,
            out_weight: out_tangent.weight,
        });
        self
    }

    fn memory_key(&self, index: usize) -> HostResult<&MemoryKey> {
        self.keys.get(index).ok_or(HostError::KeyOutOfRange {
            index,
            count: self.keys.len(),
        })
    }
}

impl AnimCurve for MemoryCurve {
    fn pre_infinity(&self) -> HostInfinity {
        self.pre_infinity
    }

    fn post_infinity(&self) -> HostInfinity {
        self.post_infinity
    }

    fn is_weighted(&self) -> bool {
        self.weighted
    }

    fn key_count(&self) -> usize {
        self.keys.len()
    }

    fn key(&self, index: usize) -> HostResult<HostKey> {
        Ok(self.memory_key(index)?.key)
    }

    fn tangent(&self, index: usize, side: TangentSide) -> HostResult<HostTangentValue> {
        let k = self.memory_key(index)?;
        Ok(match side {
            TangentSide::In => HostTangentValue {
                angle_deg: k.in_angle,
                weight: k.in_weight,
            },
            TangentSide::Out => HostTangentValue {
                angle_deg: k.out_angle,
                weight: k.out_weight,
            },
        })
    }
}

impl SceneAccess for MemoryScene {
    fn active_selection(&self) -> HostResult<Vec<ObjectPath>> {
        Ok(self.selection.clone())
    }

    fn attribute_count(&self, object: &ObjectPath) -> HostResult<usize> {
        Ok(self.object(object)?.attributes.len())
    }

    fn attribute(&self, object: &ObjectPath, index: usize) -> HostResult<AttributeInfo> {
        let attr = self
            .object(object)?
            .attributes
            .get(index)
            .ok_or_else(|| HostError::MissingAttribute {
                object: object.0.clone(),
                plug: format!("#{index}"),
            })?;
        Ok(AttributeInfo {
            plug: attr.plug.clone(),
            connected: attr.connected,
            keyable: attr.keyable,
            ty: attr.ty,
        })
    }

    fn read_bool(&self, object: &ObjectPath, plug: &str) -> HostResult<bool> {
        match self.value(object, plug)? {
            HostValue::Bool(v) => Ok(v),
            HostValue::Int(v) => Ok(v != 0),
            HostValue::Double(_) => Err(HostError::TypeMismatch {
                plug: plug.to_string(),
                expected: "bool",
            }),
        }
    }

    fn read_int(&self, object: &ObjectPath, plug: &str) -> HostResult<i32> {
        let mismatch = || HostError::TypeMismatch {
            plug: plug.to_string(),
            expected: "int",
        };
        match self.value(object, plug)? {
            HostValue::Bool(v) => Ok(i32::from(v)),
            HostValue::Int(v) => i32::try_from(v).map_err(|_| mismatch()),
            HostValue::Double(_) => Err(mismatch()),
        }
    }

    fn read_double(&self, object: &ObjectPath, plug: &str) -> HostResult<f64> {
        match self.value(object, plug)? {
            HostValue::Double(v) => Ok(v),
            HostValue::Int(v) => Ok(v as f64),
            HostValue::Bool(_) => Err(HostError::TypeMismatch {
                plug: plug.to_string(),
                expected: "double",
            }),
        }
    }

    fn is_animated(&self, object: &ObjectPath) -> HostResult<bool> {
        Ok(!self.object(object)?.animated.is_empty())
    }

    fn animated_plugs(&self, object: &ObjectPath) -> HostResult<Vec<AnimatedPlug>> {
        Ok(self.object(object)?.animated.clone())
    }

    fn curve(&self, id: CurveId) -> HostResult<&dyn AnimCurve> {
        self.curves
            .get(id.0)
            .map(|c| c as &dyn AnimCurve)
            .ok_or(HostError::MissingCurve(id.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
