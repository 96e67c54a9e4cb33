//! Integration tests for the dashboard CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A CSV-directory source with one expense outside the reporting year
fn write_source(dir: &Path) {
    fs::write(
        dir.join("Gastos.csv"),
        "Cuenta,Fecha,Categoría,Gastos\n\
         51001,43470,Travel,100\n\
         51002,2019-01-10,Travel,50\n\
         51003,2019-03-02,Office,40\n\
         51001,2018-12-31,Travel,999\n",
    )
    .unwrap();
    fs::write(
        dir.join("Presupuesto.csv"),
        "cuenta,Presupuesto Anual\n51001,1000\n51002,500\n",
    )
    .unwrap();
    fs::write(
        dir.join("Tabla Calendario.csv"),
        "Fecha,Mes,Mes Num,Trimestre,Semestre,Año\n\
         2019-01-05,Enero,1,T1,Sem 1,2019\n\
         2019-01-10,Enero,1,T1,Sem 1,2019\n\
         2019-03-02,Marzo,3,T1,Sem 1,2019\n\
         2018-12-31,Diciembre,12,T4,Sem 2,2018\n",
    )
    .unwrap();
}

struct Fixture {
    home: TempDir,
    source: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Self {
            home: TempDir::new().unwrap(),
            source: TempDir::new().unwrap(),
        };
        write_source(fixture.source.path());
        fixture
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("dashboard").unwrap();
        cmd.env("BUDGET_DASHBOARD_DIR", self.home.path())
            .env_remove("BUDGET_DASHBOARD_SOURCE")
            .env_remove("RUST_LOG")
            .arg("--source")
            .arg(self.source.path());
        cmd
    }
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("dashboard").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("categories"));
}

#[test]
fn test_summary_command() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Spent:"))
        .stdout(predicate::str::contains("190"))
        .stdout(predicate::str::contains("621,000"));
}

#[test]
fn test_categories_command() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Travel"))
        .stdout(predicate::str::contains("15.0%"))
        .stdout(predicate::str::contains("Office"));
}

#[test]
fn test_categories_top_limits_rows() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["categories", "--top", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Travel"))
        .stdout(predicate::str::contains("Office").not());
}

#[test]
fn test_periods_follow_calendar_order() {
    let fixture = Fixture::new();
    let output = fixture
        .cmd()
        .args(["periods", "--by", "month"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let enero = text.find("Enero").unwrap();
    let marzo = text.find("Marzo").unwrap();
    assert!(enero < marzo);
    assert!(!text.contains("Diciembre"));
}

#[test]
fn test_efficiency_csv_output() {
    let fixture = Fixture::new();
    let out = fixture.home.path().join("efficiency.csv");
    fixture
        .cmd()
        .arg("efficiency")
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report exported to"));

    let contents = fs::read_to_string(&out).unwrap();
    assert!(contents.starts_with("Category,Percent Used,Available,Zone"));
    assert!(contents.contains("Travel,15.00,85.00,healthy"));
}

#[test]
fn test_show_prints_every_section() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enero - Marzo 2019"))
        .stdout(predicate::str::contains("Budget Summary"))
        .stdout(predicate::str::contains("Spending by Category"))
        .stdout(predicate::str::contains("Spending by Quarter"))
        .stdout(predicate::str::contains("Budget Efficiency"));
}

#[test]
fn test_export_json() {
    let fixture = Fixture::new();
    let out = fixture.home.path().join("dashboard.json");
    fixture
        .cmd()
        .arg("export")
        .arg(&out)
        .arg("--pretty")
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["summary"]["total_spent"], 190.0);
    assert_eq!(value["load_stats"]["outside_reporting_year"], 1);
    assert_eq!(value["categories"]["rows"][0]["category"], "Travel");
}

#[test]
fn test_export_yaml() {
    let fixture = Fixture::new();
    let out = fixture.home.path().join("dashboard.yaml");
    fixture
        .cmd()
        .arg("export")
        .arg(&out)
        .args(["--format", "yaml"])
        .assert()
        .success();

    let contents = fs::read_to_string(&out).unwrap();
    assert!(contents.starts_with("# Budget Dashboard Export"));
}

#[test]
fn test_decimal_amounts_in_csv_source() {
    let fixture = Fixture::new();
    fs::write(
        fixture.source.path().join("Gastos.csv"),
        "Cuenta,Fecha,Categoría,Gastos\n\
         51001,2019-01-05,Travel,100.50\n\
         51002,2019-01-10,Travel,49.25\n",
    )
    .unwrap();

    fixture
        .cmd()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("150"));

    let out = fixture.home.path().join("dashboard.json");
    fixture.cmd().arg("export").arg(&out).assert().success();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["summary"]["total_spent"], 149.75);
}

#[test]
fn test_amount_too_large_is_reported() {
    let fixture = Fixture::new();
    fs::write(
        fixture.source.path().join("Gastos.csv"),
        "Cuenta,Fecha,Categoría,Gastos\n51001,2019-01-05,Travel,99999999999999999\n",
    )
    .unwrap();

    fixture
        .cmd()
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 2"))
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_missing_sheet_fails() {
    let home = TempDir::new().unwrap();
    let empty = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("dashboard").unwrap();
    cmd.env("BUDGET_DASHBOARD_DIR", home.path())
        .env_remove("BUDGET_DASHBOARD_SOURCE")
        .arg("--source")
        .arg(empty.path())
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sheet not found: Gastos"));
}

#[test]
fn test_init_writes_settings() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings written to"));

    let settings = fs::read_to_string(fixture.home.path().join("config.json")).unwrap();
    assert!(settings.contains("source_path"));
    assert!(settings.contains("\"mode\": \"fixed\""));
    assert!(settings.contains("\"amount\": 621000.0"));
}

#[test]
fn test_config_command() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total budget:     621,000 (fixed)"));
}
