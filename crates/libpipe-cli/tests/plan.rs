use libpipe_cli::plan::{PlanFile, PlanOverrides, build_plan};
use libpipe_model::Value;
use libpipe_transform::{CleaningPlan, MissingValueStrategy};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[test]
fn plan_file_sections() {
    let file = PlanFile::parse(
        r#"{
            "dedupe": {"keys": ["transaction_id"]},
            "missing": {"strategy": "fill", "fill_value": 0, "columns": ["fine"]},
            "dates": ["checkout_date"]
        }"#,
    )
    .expect("parse plan");
    let plan = build_plan(Some(file), PlanOverrides::default()).expect("build plan");
    let expected = CleaningPlan::new()
        .with_dedupe(Some(strings(&["transaction_id"])))
        .with_missing(
            MissingValueStrategy::Fill(Value::Integer(0)),
            Some(strings(&["fine"])),
        )
        .with_dates(strings(&["checkout_date"]));
    assert_eq!(plan, expected);
}

#[test]
fn empty_plan_file_is_an_empty_plan() {
    let file = PlanFile::parse("{}").expect("parse plan");
    let plan = build_plan(Some(file), PlanOverrides::default()).expect("build plan");
    assert!(plan.is_empty());
}

#[test]
fn flags_override_plan_fields() {
    let file = PlanFile::parse(
        r#"{"missing": {"strategy": "drop", "columns": ["isbn"]}, "dates": ["due_date"]}"#,
    )
    .expect("parse plan");
    let overrides = PlanOverrides {
        missing: Some("fill".to_string()),
        fill_value: Some("Unknown".to_string()),
        dates: Some(strings(&["checkout_date"])),
        ..PlanOverrides::default()
    };
    let plan = build_plan(Some(file), overrides).expect("build plan");
    let missing = plan.missing.expect("missing step");
    assert_eq!(missing.strategy, MissingValueStrategy::Fill(Value::from("Unknown")));
    assert_eq!(missing.columns, Some(strings(&["isbn"])));
    assert_eq!(plan.date_columns, strings(&["checkout_date"]));
}

#[test]
fn dedupe_flag_without_keys_uses_all_columns() {
    let overrides = PlanOverrides {
        dedupe: true,
        ..PlanOverrides::default()
    };
    let plan = build_plan(None, overrides).expect("build plan");
    assert_eq!(plan.dedupe.expect("dedupe step").keys, None);
}

#[test]
fn fill_without_value_is_rejected() {
    let overrides = PlanOverrides {
        missing: Some("fill".to_string()),
        ..PlanOverrides::default()
    };
    let err = build_plan(None, overrides).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"fill_value must be provided when strategy='fill'");
}

#[test]
fn unknown_strategy_is_rejected() {
    let file = PlanFile::parse(r#"{"missing": {"strategy": "invalid_strategy"}}"#)
        .expect("parse plan");
    let err = build_plan(Some(file), PlanOverrides::default()).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"Unknown strategy 'invalid_strategy' (expected one of: drop, fill, forward_fill)"
    );
}

#[test]
fn unknown_plan_keys_are_rejected() {
    assert!(PlanFile::parse(r#"{"dedup": {}}"#).is_err());
}

#[test]
fn plan_file_read_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("plan.json");
    std::fs::write(&path, "{not json").expect("write plan");
    let err = PlanFile::read(&path).unwrap_err();
    assert!(err.to_string().starts_with("parse plan file "));
}
