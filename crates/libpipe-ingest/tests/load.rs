mod common;

use std::cell::RefCell;
use std::path::Path;

use libpipe_ingest::{
    FileFormat, IngestError, LoadObserver, LoadOptions, LoadSummary, Loaded, SilentObserver, load,
    load_with_observer,
};
use libpipe_model::Value;

use common::{fixture, missing};

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<String>>,
}

impl LoadObserver for Recorder {
    fn on_start(&self, _path: &Path, format: FileFormat) {
        self.events.borrow_mut().push(format!("start {format}"));
    }

    fn on_loaded(&self, _path: &Path, summary: &LoadSummary) {
        self.events
            .borrow_mut()
            .push(format!("loaded {}x{}", summary.rows, summary.columns));
    }

    fn on_failed(&self, _path: &Path, error: &IngestError) {
        self.events.borrow_mut().push(format!("failed {error}"));
    }
}

#[test]
fn dispatches_on_extension() {
    let (_dir, path) = fixture("circulation_data.csv", b"id,isbn\n1,9783161484100\n");
    let loaded = load(&path, &LoadOptions::default()).expect("load");
    let dataset = loaded.into_single().expect("single table");
    assert_eq!(dataset.get(0, "id"), Some(&Value::Integer(1)));
}

#[test]
fn tsv_extension_loads_tab_separated_columns() {
    let (_dir, path) = fixture("holds.tsv", b"patron\tisbn\nP1\t978-3-16-148410-0\n");
    let dataset = load(&path, &LoadOptions::default())
        .expect("load")
        .into_single()
        .expect("single table");
    assert_eq!(dataset.columns(), ["patron", "isbn"]);
    assert_eq!(dataset.get(0, "isbn"), Some(&Value::from("978-3-16-148410-0")));
}

#[test]
fn format_override_beats_extension() {
    let (_dir, path) = fixture("export.txt", br#"[{"id": 1}]"#);
    let options = LoadOptions {
        format: Some(FileFormat::Json),
        ..LoadOptions::default()
    };
    let loaded = load(&path, &options).expect("load");
    assert!(matches!(loaded, Loaded::Single(ref d) if d.height() == 1));
}

#[test]
fn unknown_extension_is_unsupported() {
    let (_dir, path) = fixture("catalogue.parquet", b"PAR1");
    let err = load(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::UnsupportedFormat { ref extension, .. } if extension == "parquet"
    ));
}

#[test]
fn missing_file_wins_over_unknown_extension() {
    let (_dir, path) = missing("catalogue.parquet");
    let err = load(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }), "{err:?}");
}

#[test]
fn observer_sees_start_and_outcome() {
    let (_dir, path) = fixture("events.json", br#"{"events": [{"id": 1, "room": "A"}]}"#);
    let recorder = Recorder::default();
    load_with_observer(&path, &LoadOptions::default(), &recorder).expect("load");
    assert_eq!(
        recorder.events.into_inner(),
        vec!["start json".to_string(), "loaded 1x2".to_string()]
    );

    let (_dir, path) = fixture("broken.json", b"{invalid}");
    let recorder = Recorder::default();
    let _ = load_with_observer(&path, &LoadOptions::default(), &recorder);
    let events = recorder.events.into_inner();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], "start json");
    assert!(events[1].starts_with("failed Invalid JSON in "));
}

#[test]
fn missing_file_skips_start_event() {
    let (_dir, path) = missing("circulation_data.csv");
    let recorder = Recorder::default();
    let _ = load_with_observer(&path, &LoadOptions::default(), &recorder);
    let events = recorder.events.into_inner();
    assert_eq!(events.len(), 1);
    assert!(events[0].starts_with("failed File not found: "));
}

#[test]
fn silent_observer_still_loads() {
    let (_dir, path) = fixture("items.csv", b"barcode\n1\n2\n");
    let loaded = load_with_observer(&path, &LoadOptions::default(), &SilentObserver).expect("load");
    assert_eq!(LoadSummary::from(&loaded).rows, 2);
}
