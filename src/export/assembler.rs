use crate::document::model::Document;
use crate::document::sink::{DocumentSink, MemorySink};
use crate::export::object::serialize_object;
use crate::export::report::ExportReport;
use crate::foundation::error::ExportResult;
use crate::host::access::SceneAccess;

/// Export the host's active selection into `sink`.
///
/// One linear pass: objects are serialized and written in selection order, duplicates included.
/// The selection is read before the sink is begun, so a host that cannot enumerate it leaves the
/// sink untouched. Per-attribute read failures are collected in the returned report; only
/// selection and sink failures abort the export.
#[tracing::instrument(skip_all)]
pub fn export_selection<S, K>(scene: &S, sink: &mut K) -> ExportResult<ExportReport>
where
    S: SceneAccess + ?Sized,
    K: DocumentSink + ?Sized,
{
    let selection = scene.active_selection()?;
    tracing::debug!(objects = selection.len(), "exporting selection");

    let mut report = ExportReport::default();
    sink.begin()?;
    for path in &selection {
        let node = serialize_object(scene, path, &mut report);
        sink.write_object(&node)?;
        report.objects += 1;
    }
    sink.finish()?;

    tracing::info!(
        objects = report.objects,
        static_attributes = report.static_attributes,
        keyed_attributes = report.keyed_attributes,
        warnings = report.warnings.len(),
        "export finished"
    );
    Ok(report)
}

/// Export the active selection into an in-memory [`Document`].
pub fn export_document<S: SceneAccess + ?Sized>(
    scene: &S,
) -> ExportResult<(Document, ExportReport)> {
    let mut sink = MemorySink::new();
    let report = export_selection(scene, &mut sink)?;
    Ok((sink.into_document(), report))
}

#[cfg(test)]
#[path = "../../tests/unit/export/assembler.rs"]
mod tests;
