//! End-to-end tests of the transform and write stages.

use calamine::{open_workbook, Reader, Xlsx};
use olist_export::{
    export_table, run_export, Config, ConnectionConfig, ExportError, OutputFormat, Profile,
    SchemaWarning, Table,
};
use tempfile::TempDir;

#[path = "helpers.rs"]
mod helpers;

use helpers::{category_monthly_table, customer_ltv_table, read_csv};

fn config_in(profile: Profile, temp_dir: &TempDir) -> Config {
    Config {
        output_dir: temp_dir.path().join("out"),
        ..Config::for_profile(profile)
    }
}

#[test]
fn test_category_monthly_cleans_and_filters() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = config_in(Profile::CategoryMonthly, &temp_dir);

    let table = category_monthly_table(&[
        (Some("electronics"), "2021-01", 30, 100.0),
        (Some("   "), "2021-01", 25, 50.0),
        (None, "2021-02", 10, 20.0),
        (Some("toys"), "2021-03", 50, 75.0),
    ]);

    let report = export_table(table, &config).expect("Export failed");

    assert!(report.warnings.is_empty());
    assert_eq!(report.rows, 3);
    assert_eq!(report.columns, 4);
    assert_eq!(
        report.outputs,
        vec![
            config.output_path(OutputFormat::Csv),
            config.output_path(OutputFormat::Xlsx)
        ]
    );
    assert!(report.summary.is_none());

    let (headers, rows) = read_csv(&config.output_path(OutputFormat::Csv));
    assert_eq!(headers[0], "product_category_name_english");
    let categories: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    let months: Vec<&str> = rows.iter().map(|r| r[1].as_str()).collect();
    // 2021-02 totals 10 orders and is dropped; 2021-03 hits the threshold exactly
    assert_eq!(categories, vec!["electronics", "Unknown", "toys"]);
    assert_eq!(months, vec!["2021-01", "2021-01", "2021-03"]);

    let mut workbook: Xlsx<_> = open_workbook(config.output_path(OutputFormat::Xlsx))
        .expect("Failed to open workbook");
    let range = workbook
        .worksheet_range("Sheet1")
        .expect("Failed to read sheet");
    assert_eq!(range.rows().count(), 4);
}

#[test]
fn test_category_monthly_all_months_below_threshold() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = config_in(Profile::CategoryMonthly, &temp_dir);

    let table = category_monthly_table(&[
        (Some("toys"), "2021-01", 5, 1.0),
        (Some("garden"), "2021-02", 7, 2.0),
    ]);
    let report = export_table(table, &config).expect("Export failed");

    assert_eq!(report.rows, 0);
    let (headers, rows) = read_csv(&config.output_path(OutputFormat::Csv));
    assert_eq!(headers.len(), 4);
    assert!(rows.is_empty());
}

#[test]
fn test_category_monthly_missing_columns_warns_and_exports() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut config = config_in(Profile::CategoryMonthly, &temp_dir);
    config.clean_column = Some("category".to_string());
    if let Some(filter) = config.threshold_filter.as_mut() {
        filter.group_column = "month".to_string();
    }

    let table = category_monthly_table(&[
        (None, "2021-01", 1, 1.0),
        (Some("toys"), "2021-02", 2, 2.0),
    ]);
    let report = export_table(table, &config).expect("Export failed");

    assert_eq!(
        report.warnings,
        vec![
            SchemaWarning::MissingCleanColumn {
                column: "category".to_string()
            },
            SchemaWarning::MissingFilterColumns {
                group: "month".to_string(),
                measure: "distinct_orders".to_string()
            },
        ]
    );
    // Nothing cleaned, nothing filtered
    assert_eq!(report.rows, 2);
    let (_, rows) = read_csv(&config.output_path(OutputFormat::Csv));
    assert_eq!(rows[0][0], "");
}

#[test]
fn test_nan_threshold_is_rejected_before_writing() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut config = config_in(Profile::CategoryMonthly, &temp_dir);
    if let Some(filter) = config.threshold_filter.as_mut() {
        filter.min_total = f64::NAN;
    }

    let table = category_monthly_table(&[
        (Some("toys"), "2021-01", 500, 1.0),
        (Some("garden"), "2021-02", 700, 2.0),
    ]);
    let err = export_table(table, &config).expect_err("NaN threshold must fail");

    assert!(
        matches!(err, ExportError::InvalidSetting { ref name, .. } if name == "min_total"),
        "unexpected error: {err}"
    );
    assert!(!config.output_dir.exists(), "nothing written");
}

#[test]
fn test_customer_ltv_writes_table_and_summary() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = config_in(Profile::CustomerLtv, &temp_dir);

    let table = customer_ltv_table(&[
        ("c1", 2, Some(100.0)),
        ("c2", 1, Some(50.0)),
        ("c1", 1, None),
        ("c3", 4, Some(300.0)),
    ]);
    let report = export_table(table, &config).expect("Export failed");

    assert_eq!(report.rows, 4);
    assert_eq!(report.outputs, vec![config.output_path(OutputFormat::Csv)]);
    let summary_path = report.summary.clone().expect("summary written");
    assert_eq!(Some(summary_path.clone()), config.summary_path());

    let (headers, rows) = read_csv(&config.output_path(OutputFormat::Csv));
    assert_eq!(headers, vec!["customer_unique_id", "order_count", "ltv"]);
    assert_eq!(rows.len(), 4);

    let (headers, rows) = read_csv(&summary_path);
    assert_eq!(headers, vec!["metric", "value"]);
    let metric = |name: &str| -> String {
        rows.iter()
            .find(|r| r[0] == name)
            .map(|r| r[1].clone())
            .unwrap_or_else(|| panic!("metric {name} missing"))
    };
    assert_eq!(metric("rows"), "4");
    assert_eq!(metric("distinct_customers"), "3");
    assert_eq!(metric("total_orders"), "8");
    assert_eq!(metric("avg_orders_per_customer"), "2");
    assert_eq!(metric("total_revenue"), "450");
    assert_eq!(metric("avg_revenue_per_customer"), "150");
    assert_eq!(metric("median_revenue_per_customer"), "100");
}

#[test]
fn test_customer_ltv_summary_without_known_columns() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = config_in(Profile::CustomerLtv, &temp_dir);

    let table = Table::with_schema([("something_else", olist_export::ColumnType::Text)]);
    let report = export_table(table, &config).expect("Export failed");

    let (_, rows) = read_csv(&report.summary.expect("summary written"));
    assert_eq!(rows, vec![vec!["rows".to_string(), "0".to_string()]]);
}

#[test]
fn test_duplicate_formats_written_once() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut config = config_in(Profile::CustomerLtv, &temp_dir);
    config.formats = vec![OutputFormat::Csv, OutputFormat::Csv];
    config.summary_stem = None;

    let table = customer_ltv_table(&[("c1", 1, Some(1.0))]);
    let report = export_table(table, &config).expect("Export failed");
    assert_eq!(report.outputs.len(), 1);
}

#[tokio::test]
async fn test_run_export_fails_fast_without_credentials() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = config_in(Profile::CustomerLtv, &temp_dir);
    let connection = ConnectionConfig::new("localhost", 5432, "olist_analytics", "", None);

    let err = run_export(&config, &connection)
        .await
        .expect_err("missing credentials must fail");
    match err {
        ExportError::Configuration { missing } => {
            assert_eq!(missing, vec!["PGUSER".to_string(), "PGPASSWORD".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!config.output_dir.exists(), "no output before connecting");
}

#[tokio::test]
async fn test_run_export_rejects_invalid_view_name() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut config = config_in(Profile::CategoryMonthly, &temp_dir);
    config.view = "vw_x; DROP TABLE orders".to_string();
    let connection =
        ConnectionConfig::new("localhost", 5432, "olist_analytics", "analyst", None);

    let err = run_export(&config, &connection)
        .await
        .expect_err("invalid view must fail");
    assert!(matches!(err, ExportError::InvalidViewName(_)), "{err}");
}
