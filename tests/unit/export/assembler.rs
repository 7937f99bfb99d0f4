use super::*;
use crate::document::model::ObjectNode;
use crate::foundation::error::{ExportError, HostError, HostResult};
use crate::host::access::{
    AnimCurve, AnimatedPlug, AttributeInfo, AttributeType, CurveId, ObjectPath,
};
use crate::host::memory::{HostValue, MemoryObject, MemoryScene};

fn two_objects() -> MemoryScene {
    let mut scene = MemoryScene::new();
    scene.add_object(
        "|a",
        MemoryObject::new("a").attr("tx", AttributeType::DoubleLinear, HostValue::Double(1.0)),
    );
    scene.add_object(
        "|b",
        MemoryObject::new("b").attr("mode", AttributeType::Enum, HostValue::Int(3)),
    );
    scene
}

fn ids(doc: &Document) -> Vec<&str> {
    doc.objects.iter().map(|o| o.id.as_str()).collect()
}

#[test]
fn empty_selection_is_an_empty_document() {
    let scene = two_objects();
    let (doc, report) = export_document(&scene).unwrap();
    assert!(doc.objects.is_empty());
    assert_eq!(report.objects, 0);
    assert!(report.is_clean());
}

#[test]
fn selection_order_and_duplicates_are_preserved() {
    let mut scene = two_objects();
    scene.select("|b");
    scene.select("|a");
    scene.select("|b");
    let (doc, report) = export_document(&scene).unwrap();
    assert_eq!(ids(&doc), vec!["|b", "|a", "|b"]);
    assert_eq!(doc.objects[0], doc.objects[2]);
    assert_eq!(report.objects, 3);
    assert_eq!(report.static_attributes, 3);
}

#[test]
fn sink_is_begun_and_finished() {
    let mut scene = two_objects();
    scene.select("|a");
    let mut sink = MemorySink::new();
    export_selection(&scene, &mut sink).unwrap();
    assert!(sink.is_finished());
    assert_eq!(sink.document().objects.len(), 1);
}

/// Scene whose selection cannot be read.
struct NoSelection;

impl SceneAccess for NoSelection {
    fn active_selection(&self) -> HostResult<Vec<ObjectPath>> {
        Err(HostError::read("no active session"))
    }
    fn attribute_count(&self, _: &ObjectPath) -> HostResult<usize> {
        unreachable!()
    }
    fn attribute(&self, _: &ObjectPath, _: usize) -> HostResult<AttributeInfo> {
        unreachable!()
    }
    fn read_bool(&self, _: &ObjectPath, _: &str) -> HostResult<bool> {
        unreachable!()
    }
    fn read_int(&self, _: &ObjectPath, _: &str) -> HostResult<i32> {
        unreachable!()
    }
    fn read_double(&self, _: &ObjectPath, _: &str) -> HostResult<f64> {
        unreachable!()
    }
    fn is_animated(&self, _: &ObjectPath) -> HostResult<bool> {
        unreachable!()
    }
    fn animated_plugs(&self, _: &ObjectPath) -> HostResult<Vec<AnimatedPlug>> {
        unreachable!()
    }
    fn curve(&self, _: CurveId) -> HostResult<&dyn AnimCurve> {
        unreachable!()
    }
}

/// Sink that fails after a number of objects.
struct FailingSink {
    accepted: usize,
    limit: usize,
    began: bool,
}

impl DocumentSink for FailingSink {
    fn begin(&mut self) -> ExportResult<()> {
        self.began = true;
        Ok(())
    }
    fn write_object(&mut self, _: &ObjectNode) -> ExportResult<()> {
        if self.accepted == self.limit {
            return Err(std::io::Error::other("disk full").into());
        }
        self.accepted += 1;
        Ok(())
    }
    fn finish(&mut self) -> ExportResult<()> {
        Ok(())
    }
}

#[test]
fn selection_failure_is_fatal_before_the_sink_opens() {
    let mut sink = FailingSink {
        accepted: 0,
        limit: 10,
        began: false,
    };
    let err = export_selection(&NoSelection, &mut sink).unwrap_err();
    assert!(matches!(err, ExportError::Host(_)));
    assert!(!sink.began);
}

#[test]
fn sink_write_failure_aborts() {
    let mut scene = two_objects();
    scene.select("|a");
    scene.select("|b");
    let mut sink = FailingSink {
        accepted: 0,
        limit: 1,
        began: false,
    };
    let err = export_selection(&scene, &mut sink).unwrap_err();
    assert!(matches!(err, ExportError::Io(_)));
    assert_eq!(sink.accepted, 1);
}

#[test]
fn works_through_trait_objects() {
    let mut scene = two_objects();
    scene.select("|a");
    let dyn_scene: &dyn SceneAccess = &scene;
    let mut sink = MemorySink::new();
    let dyn_sink: &mut dyn DocumentSink = &mut sink;
    let report = export_selection(dyn_scene, dyn_sink).unwrap();
    assert_eq!(report.objects, 1);
}
