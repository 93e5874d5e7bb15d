use atnviz::{
    Automaton, DirectorySink, Error, GenerateOptions, MemorySink, generate, write_documents,
};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn calc() -> Automaton {
    let text = std::fs::read_to_string(workspace_root().join("fixtures").join("calc.json"))
        .expect("fixture");
    Automaton::from_json_str(&text).expect("valid snapshot")
}

#[test]
fn directory_sink_writes_every_document() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out_dir = tmp.path().join("nested").join("out");
    let docs = generate(&calc(), &GenerateOptions::default());

    let mut sink = DirectorySink::new(&out_dir);
    let written = write_documents(&docs, &mut sink)
        .into_result()
        .expect("all written");
    assert_eq!(written.len(), docs.len());

    for doc in &docs {
        let on_disk = std::fs::read_to_string(out_dir.join(&doc.name)).expect("read back");
        assert_eq!(on_disk, doc.content);
    }
}

#[test]
fn directory_sink_reports_every_failed_document() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, "occupied").expect("write blocker");

    let docs = generate(&calc(), &GenerateOptions::default());
    let report = write_documents(&docs, &mut DirectorySink::new(&blocker));
    assert!(!report.is_success());
    assert!(report.written.is_empty());
    assert_eq!(report.failures.len(), docs.len());

    let Err(Error::WriteFailures { attempted, failures }) = report.into_result() else {
        panic!("expected WriteFailures");
    };
    assert_eq!(attempted, docs.len());
    assert_eq!(failures[0].name, "clusters_for_prog.dot");
}

#[test]
fn memory_and_directory_sinks_agree() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let docs = generate(&calc(), &GenerateOptions::default());

    let mut memory = MemorySink::default();
    write_documents(&docs, &mut memory);
    write_documents(&docs, &mut DirectorySink::new(tmp.path()));

    for (name, content) in &memory.documents {
        let on_disk = std::fs::read_to_string(tmp.path().join(name)).expect("read back");
        assert_eq!(&on_disk, content);
    }
}

#[test]
fn directory_sink_exposes_its_root() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let sink = DirectorySink::new(tmp.path().join("dot"));
    assert_eq!(sink.root(), tmp.path().join("dot"));
}
