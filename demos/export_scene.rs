use animexport::{FileSinkOpts, MemoryScene, XmlSink, XmlSinkOpts, export_selection};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let scene = MemoryScene::from_path(manifest.join("tests/data/scene_basic.json"))?;

    let out = manifest.join("target").join("demos").join("anim.xml");
    let mut sink = XmlSink::create(&FileSinkOpts::new(&out), XmlSinkOpts::default())?;
    let report = export_selection(&scene, &mut sink)?;
    drop(sink);

    for w in &report.warnings {
        eprintln!("warning: {} {}: {}", w.object, w.attribute, w.message);
    }
    eprintln!(
        "wrote {} ({} objects, {} static, {} keyed)",
        out.display(),
        report.objects,
        report.static_attributes,
        report.keyed_attributes
    );
    Ok(())
}
