use libpipe_model::{Dataset, Value};
use libpipe_validate::{ValidateError, check_isbn_column, validate_isbn};
use proptest::prelude::*;

fn catalogue() -> Dataset {
    Dataset::from_rows(
        ["title", "isbn"],
        vec![
            vec![Value::from("Dune"), Value::from("978-0-441-17271-9")],
            vec![Value::from("Emma"), Value::Absent],
            vec![Value::from("Ulysses"), Value::from("12345")],
            vec![Value::from("Beloved"), Value::Integer(9_781_400_033_416)],
            vec![Value::from("Middlemarch"), Value::from("")],
            vec![Value::from("Kindred"), Value::from("12345")],
        ],
    )
    .expect("catalogue")
}

#[test]
fn validator_examples() {
    assert!(validate_isbn(&Value::from("978-3-16-148410-0")));
    assert!(!validate_isbn(&Value::from("")));
    assert!(!validate_isbn(&Value::from("12345")));
    assert!(!validate_isbn(&Value::Absent));
}

#[test]
fn column_report_counts_and_rows() {
    let report = check_isbn_column(&catalogue(), "isbn").expect("check");
    assert_eq!(report.checked, 5);
    assert_eq!(report.absent, 1);
    assert_eq!(report.valid(), 2);
    let rows: Vec<usize> = report.invalid.iter().map(|entry| entry.row).collect();
    assert_eq!(rows, vec![2, 4, 5]);
    assert_eq!(report.samples(5), vec!["12345".to_string(), String::new()]);
    assert!(!report.is_clean());
}

#[test]
fn report_serializes_for_summaries() {
    let dataset = Dataset::from_rows(["isbn"], vec![vec![Value::from("12345")]]).expect("dataset");
    let report = check_isbn_column(&dataset, "isbn").expect("check");
    insta::assert_snapshot!(serde_json::to_string(&report).unwrap(), @r#"{"column":"isbn","checked":1,"absent":0,"invalid":[{"row":0,"value":{"kind":"Text","value":"12345"}}]}"#);
}

#[test]
fn unknown_column_is_an_error() {
    let err = check_isbn_column(&catalogue(), "issn").unwrap_err();
    assert!(matches!(err, ValidateError::Model(_)));
    insta::assert_snapshot!(err.to_string(), @"unknown column 'issn'");
}

proptest! {
    #[test]
    fn thirteen_digits_always_valid(digits in "[0-9]{13}") {
        prop_assert!(validate_isbn(&Value::Text(digits.clone())));
        let hyphenated = format!("{}-{}-{}", &digits[..3], &digits[3..4], &digits[4..]);
        prop_assert!(validate_isbn(&Value::Text(hyphenated)));
    }

    #[test]
    fn other_lengths_never_valid(digits in "[0-9]{1,12}|[0-9]{14,20}") {
        prop_assert!(!validate_isbn(&Value::Text(digits)));
    }
}
