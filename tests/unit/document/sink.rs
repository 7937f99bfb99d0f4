use super::*;

fn object(id: &str) -> ObjectNode {
    ObjectNode {
        id: id.to_string(),
        attributes: vec![],
    }
}

#[test]
fn memory_sink_collects_in_order() {
    let mut sink = MemorySink::new();
    sink.begin().unwrap();
    sink.write_object(&object("|b")).unwrap();
    sink.write_object(&object("|a")).unwrap();
    sink.write_object(&object("|b")).unwrap();
    assert!(!sink.is_finished());
    sink.finish().unwrap();
    assert!(sink.is_finished());

    let ids: Vec<&str> = sink
        .document()
        .objects
        .iter()
        .map(|o| o.id.as_str())
        .collect();
    assert_eq!(ids, vec!["|b", "|a", "|b"]);
}

#[test]
fn memory_sink_begin_resets() {
    let mut sink = MemorySink::new();
    sink.begin().unwrap();
    sink.write_object(&object("|a")).unwrap();
    sink.finish().unwrap();
    sink.begin().unwrap();
    assert!(sink.document().objects.is_empty());
    assert!(!sink.is_finished());
}

#[test]
fn open_output_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("anim.xml");
    let w = open_output(&FileSinkOpts::new(&path)).unwrap();
    drop(w);
    assert!(path.is_file());
}

#[test]
fn open_output_respects_overwrite_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("anim.xml");
    std::fs::write(&path, "old").unwrap();

    let opts = FileSinkOpts {
        path: path.clone(),
        overwrite: false,
    };
    let err = open_output(&opts).unwrap_err();
    assert!(matches!(err, ExportError::Sink(_)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "old");

    drop(open_output(&FileSinkOpts::new(&path)).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn open_output_fails_on_directory_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = open_output(&FileSinkOpts::new(dir.path())).unwrap_err();
    assert!(matches!(err, ExportError::Sink(_)));
}

#[test]
fn exclusive_open_creates_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.xml");
    let opts = FileSinkOpts {
        path: path.clone(),
        overwrite: false,
    };
    let mut w = open_output(&opts).unwrap();
    w.write_all(b"<Data />").unwrap();
    drop(w);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "<Data />");

    let err = open_output(&opts).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

/// Writer accepting at most `room` bytes per call, failing once `limit` bytes are in.
struct Narrow {
    buf: Vec<u8>,
    room: usize,
    limit: usize,
}

impl Write for Narrow {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.buf.len() >= self.limit {
            return Err(io::Error::other("full"));
        }
        let n = data.len().min(self.room);
        self.buf.extend_from_slice(&data[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_chunk_distinguishes_clean_and_torn_failures() {
    let mut w = Narrow {
        buf: Vec::new(),
        room: 2,
        limit: 4,
    };
    assert!(write_chunk(&mut w, b"abcd").is_ok());
    assert!(matches!(
        write_chunk(&mut w, b"ef"),
        Err(ChunkError::Clean(_))
    ));

    let mut w = Narrow {
        buf: Vec::new(),
        room: 2,
        limit: 2,
    };
    assert!(matches!(
        write_chunk(&mut w, b"abcd"),
        Err(ChunkError::Torn(_))
    ));
    assert_eq!(w.buf, b"ab");
}
