mod common;

use libpipe_ingest::{CsvOptions, IngestError, load_csv};
use libpipe_model::Value;

use common::{fixture, missing};

#[test]
fn loads_circulation_export() {
    let (_dir, path) = fixture(
        "circulation_data.csv",
        b"transaction_id,isbn,checkout_date,fine\n\
          1,978-3-16-148410-0,2024-01-15,0.5\n\
          2,9780306406157,01/20/2024,NA\n",
    );
    let dataset = load_csv(&path, &CsvOptions::default()).expect("load csv");

    assert_eq!(
        dataset.columns(),
        ["transaction_id", "isbn", "checkout_date", "fine"]
    );
    assert_eq!(dataset.height(), 2);
    assert_eq!(dataset.get(0, "transaction_id"), Some(&Value::Integer(1)));
    assert_eq!(dataset.get(1, "isbn"), Some(&Value::from("9780306406157")));
    assert_eq!(dataset.get(0, "fine"), Some(&Value::Float(0.5)));
    assert_eq!(dataset.get(1, "fine"), Some(&Value::Absent));
    assert_eq!(dataset.get(1, "checkout_date"), Some(&Value::from("01/20/2024")));
}

#[test]
fn na_tokens_become_absent() {
    let (_dir, path) = fixture(
        "patrons.csv",
        b"name,branch\nAda,\nGrace,N/A\nLinus,null\nKen,Central\n",
    );
    let dataset = load_csv(&path, &CsvOptions::default()).expect("load csv");
    let branch = dataset.column_values("branch").expect("branch column");
    assert_eq!(
        branch,
        vec![
            &Value::Absent,
            &Value::Absent,
            &Value::Absent,
            &Value::from("Central")
        ]
    );
}

#[test]
fn infers_boolean_columns_and_keeps_text_columns() {
    let (_dir, path) = fixture("items.csv", b"barcode,reference\n007,true\n010,FALSE\n");

    let inferred = load_csv(&path, &CsvOptions::default()).expect("load csv");
    assert_eq!(inferred.get(0, "barcode"), Some(&Value::Integer(7)));
    assert_eq!(inferred.get(1, "reference"), Some(&Value::Boolean(false)));

    let options = CsvOptions::default().with_text_columns(vec!["barcode".to_string()]);
    let as_text = load_csv(&path, &options).expect("load csv");
    assert_eq!(as_text.get(0, "barcode"), Some(&Value::from("007")));
}

#[test]
fn short_rows_are_padded_with_absent() {
    let (_dir, path) = fixture("events.csv", b"id,title,room\n1,Story time\n2,Chess,B\n");
    let dataset = load_csv(&path, &CsvOptions::default()).expect("load csv");
    assert_eq!(dataset.get(0, "room"), Some(&Value::Absent));
    assert_eq!(dataset.get(1, "room"), Some(&Value::from("B")));
}

#[test]
fn long_rows_are_rejected() {
    let (_dir, path) = fixture("broken.csv", b"id,title\n1,Dune,extra\n");
    let err = load_csv(&path, &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::CsvParse { .. }), "{err:?}");
    assert!(err.to_string().contains("expected 2 fields"));
}

#[test]
fn header_only_file_has_no_rows() {
    let (_dir, path) = fixture("empty_rows.csv", b"id,title\n");
    let dataset = load_csv(&path, &CsvOptions::default()).expect("load csv");
    assert_eq!(dataset.columns(), ["id", "title"]);
    assert!(dataset.is_empty());
}

#[test]
fn empty_file_is_an_error() {
    let (_dir, path) = fixture("empty.csv", b"");
    let err = load_csv(&path, &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyCsv { .. }), "{err:?}");
}

#[test]
fn missing_file_is_reported() {
    let (_dir, path) = missing("nonexistent.csv");
    let err = load_csv(&path, &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }), "{err:?}");
    assert!(err.to_string().starts_with("File not found: "));
}

#[test]
fn tab_delimited_files_load() {
    let (_dir, path) = fixture("holds.tsv", b"patron\tisbn\nP1\t978-3-16-148410-0\n");
    let options = CsvOptions::default().with_delimiter(b'\t');
    let dataset = load_csv(&path, &options).expect("load tsv");
    assert_eq!(dataset.get(0, "isbn"), Some(&Value::from("978-3-16-148410-0")));
}
