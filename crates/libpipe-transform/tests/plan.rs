//! End-to-end tests for the cleaning plan.

mod common;

use common::{frame, ints, opt_ints, texts, with_duplicates, with_missing};
use libpipe_model::Value;
use libpipe_transform::{CleaningPlan, MissingValueStrategy, Stage, StageReport};

#[test]
fn dedupe_scenario_keeps_first_of_each_id() {
    let outcome = CleaningPlan::new()
        .with_dedupe(Some(vec!["id".to_string()]))
        .run(&with_duplicates())
        .unwrap();

    assert_eq!(outcome.report.input_rows, 6);
    assert_eq!(outcome.report.output_rows, 3);
    assert_eq!(
        outcome.dataset.column_values("id").unwrap(),
        vec![&Value::Integer(1), &Value::Integer(2), &Value::Integer(3)]
    );
}

#[test]
fn drop_scenario_keeps_fully_populated_records() {
    let outcome = CleaningPlan::new()
        .with_missing(MissingValueStrategy::Drop, None)
        .run(&with_missing())
        .unwrap();
    assert_eq!(outcome.dataset.height(), 2);
    assert_eq!(
        outcome.report.stages,
        vec![StageReport {
            stage: Stage::Missing,
            rows_in: 4,
            rows_out: 2,
            absent_cells: 0,
        }]
    );
}

#[test]
fn stages_run_in_pipeline_order() {
    let dataset = frame(vec![
        ("transaction_id", ints(&[1, 1, 2, 3])),
        (
            "checkout_date",
            texts(&[Some("01/02/2024"), Some("01/02/2024"), None, Some("2024-01-05")]),
        ),
        ("fine", opt_ints(&[Some(0), Some(0), Some(2), None])),
    ]);
    let outcome = CleaningPlan::new()
        .with_dedupe(Some(vec!["transaction_id".to_string()]))
        .with_missing(MissingValueStrategy::ForwardFill, None)
        .with_dates(vec!["checkout_date".to_string()])
        .run(&dataset)
        .unwrap();

    let stages: Vec<Stage> = outcome.report.stages.iter().map(|s| s.stage).collect();
    assert_eq!(stages, vec![Stage::Dedupe, Stage::Missing, Stage::Dates]);
    assert_eq!(outcome.dataset.height(), 3);
    // forward fill ran before date parsing, so the copied text was parsed too
    assert_eq!(
        outcome.dataset.get(1, "checkout_date").unwrap().to_string(),
        "2024-01-02"
    );
    assert_eq!(outcome.dataset.get(2, "fine"), Some(&Value::Integer(2)));
    assert!(outcome.report.unparsed_dates.is_empty());
}

#[test]
fn unknown_date_column_fails_before_any_stage() {
    let err = CleaningPlan::new()
        .with_dedupe(None)
        .with_dates(vec!["renewed_on".to_string()])
        .run(&with_duplicates())
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown column 'renewed_on'");
}

#[test]
fn empty_plan_returns_input() {
    let plan = CleaningPlan::new();
    assert!(plan.is_empty());
    let dataset = with_missing();
    let outcome = plan.run(&dataset).unwrap();
    assert_eq!(outcome.dataset, dataset);
    assert!(outcome.report.stages.is_empty());
}

#[test]
fn report_serializes_for_json_summaries() {
    let outcome = CleaningPlan::new()
        .with_dates(vec!["name".to_string()])
        .run(&with_missing())
        .unwrap();
    let json = serde_json::to_value(&outcome.report).unwrap();
    assert_eq!(json["stages"][0]["stage"], "dates");
    assert_eq!(json["unparsed_dates"].as_array().unwrap().len(), 3);
    assert_eq!(json["unparsed_dates"][0]["value"]["kind"], "Text");
}
