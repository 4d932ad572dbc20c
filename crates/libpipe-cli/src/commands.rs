use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, warn};

use libpipe_cli::logging::redact_value;
use libpipe_cli::plan::{PlanFile, build_plan};
use libpipe_ingest::{
    CsvOptions, FileFormat, JsonOptions, LoadOptions, Loaded, SheetSelection, load,
};
use libpipe_model::Dataset;
use libpipe_transform::{CleaningOutcome, CleaningPlan};
use libpipe_validate::{IsbnReport, check_isbn_column};

use crate::cli::{CheckIsbnArgs, CleanArgs, FormatArg, InspectArgs, LoadArgs};
use crate::types::{CleanResult, CleanedTable, IsbnResult, IsbnTable};

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let path = &args.load.file;
    let span = info_span!("clean", file = %path.display());
    let _guard = span.enter();

    let plan_file = args.plan.as_deref().map(PlanFile::read).transpose()?;
    let plan = build_plan(plan_file, args.overrides()).context("build cleaning plan")?;
    if plan.is_empty() {
        warn!("no cleaning stage selected");
    }

    let loaded = load_input(&args.load)?;
    let tables = loaded
        .tables()
        .into_iter()
        .map(|(sheet, dataset)| CleanedTable {
            sheet: sheet.map(str::to_string),
            outcome: clean_table(&plan, sheet, dataset),
        })
        .collect();
    Ok(CleanResult {
        file: path.clone(),
        tables,
    })
}

fn clean_table(
    plan: &CleaningPlan,
    sheet: Option<&str>,
    dataset: &Dataset,
) -> Result<CleaningOutcome, String> {
    let span = info_span!("table", sheet = sheet.unwrap_or("-"));
    let _guard = span.enter();
    match plan.run(dataset) {
        Ok(outcome) => {
            for stage in &outcome.report.stages {
                info!(
                    stage = ?stage.stage,
                    rows_in = stage.rows_in,
                    rows_out = stage.rows_out,
                    absent_cells = stage.absent_cells,
                    "stage complete"
                );
            }
            for entry in &outcome.report.unparsed_dates {
                let value = entry.value.to_string();
                debug!(
                    row = entry.row,
                    column = %entry.column,
                    kind = entry.value.kind(),
                    value = redact_value(&value),
                    "date left unparsed"
                );
            }
            Ok(outcome)
        }
        Err(error) => {
            warn!(%error, "cleaning failed");
            Err(error.to_string())
        }
    }
}

pub fn run_inspect(args: &InspectArgs) -> Result<Loaded> {
    let span = info_span!("inspect", file = %args.load.file.display());
    let _guard = span.enter();
    load_input(&args.load)
}

pub fn run_check_isbn(args: &CheckIsbnArgs) -> Result<IsbnResult> {
    let span = info_span!("check_isbn", file = %args.load.file.display(), column = %args.column);
    let _guard = span.enter();

    let loaded = load_input(&args.load)?;
    let tables = loaded
        .tables()
        .into_iter()
        .map(|(sheet, dataset)| IsbnTable {
            sheet: sheet.map(str::to_string),
            outcome: check_table(dataset, &args.column),
        })
        .collect();
    Ok(IsbnResult {
        file: args.load.file.clone(),
        column: args.column.clone(),
        tables,
    })
}

fn check_table(dataset: &Dataset, column: &str) -> Result<IsbnReport, String> {
    let report = check_isbn_column(dataset, column).map_err(|error| error.to_string())?;
    info!(
        checked = report.checked,
        invalid = report.invalid.len(),
        absent = report.absent,
        "identifier check complete"
    );
    for entry in &report.invalid {
        let value = entry.value.to_string();
        debug!(
            row = entry.row,
            kind = entry.value.kind(),
            value = redact_value(&value),
            "invalid ISBN-13"
        );
    }
    Ok(report)
}

fn load_input(args: &LoadArgs) -> Result<Loaded> {
    let options = load_options(args)?;
    load(&args.file, &options).context("load input file")
}

fn load_options(args: &LoadArgs) -> Result<LoadOptions> {
    let mut csv = CsvOptions::default().with_text_columns(args.text_columns.clone());
    if let Some(raw) = args.delimiter {
        let Some(delimiter) = u8::try_from(raw).ok().filter(u8::is_ascii) else {
            bail!("delimiter must be a single ASCII character, got '{raw}'");
        };
        csv = csv.with_delimiter(delimiter);
    }
    let sheets = if args.all_sheets {
        SheetSelection::All
    } else {
        match args.sheets.as_slice() {
            [] => SheetSelection::default(),
            [one] => SheetSelection::Name(one.clone()),
            many => SheetSelection::Names(many.to_vec()),
        }
    };
    Ok(LoadOptions {
        format: args.format.map(file_format),
        csv,
        json: JsonOptions::with_record_key(args.json_key.clone()),
        sheets,
    })
}

fn file_format(arg: FormatArg) -> FileFormat {
    match arg {
        FormatArg::Csv => FileFormat::Csv,
        FormatArg::Json => FileFormat::Json,
        FormatArg::Excel => FileFormat::Excel,
    }
}
