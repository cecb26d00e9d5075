//! Query guard-rail tests for csvjoin
//!
//! End-to-end coverage of query-text resolution from files, the
//! read-statement validation, the mutating-keyword advisory, and SQL
//! execution failures.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_query_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let test_file = prepare_test_file(temp_dir.path())?;
    let query_file = temp_dir.path().join("query.sql");
    fs::write(&query_file, "select count(*) as n from people\n")?;

    let mut cmd = Command::cargo_bin("csvjoin")?;
    cmd.arg("-t")
        .arg(test_file.to_str().unwrap())
        .arg("-q")
        .arg(query_file.to_str().unwrap())
        .arg("--csv");

    cmd.assert().success().stdout(predicate::str::diff("n\n3\n"));

    Ok(())
}

#[test]
fn test_non_read_statement_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let test_file = prepare_test_file(temp_dir.path())?;

    let mut cmd = Command::cargo_bin("csvjoin")?;
    cmd.arg("-t")
        .arg(test_file.to_str().unwrap())
        .arg("-q")
        .arg("drop table people");

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("# "))
        .stderr(predicate::str::contains("--adhoc"));

    Ok(())
}

#[test]
fn test_rejection_happens_before_execution() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let test_file = prepare_test_file(temp_dir.path())?;
    let db_path = temp_dir.path().join("state.duckdb");

    // The rejected statement must not reach the engine
    let mut cmd = Command::cargo_bin("csvjoin")?;
    cmd.arg("-t")
        .arg(test_file.to_str().unwrap())
        .arg("-d")
        .arg(db_path.to_str().unwrap())
        .arg("-q")
        .arg("delete from people");
    cmd.assert().failure();

    // The table loaded before rejection is still intact
    let mut cmd = Command::cargo_bin("csvjoin")?;
    cmd.arg("-d")
        .arg(db_path.to_str().unwrap())
        .arg("-q")
        .arg("select count(*) as n from people")
        .arg("--csv");
    cmd.assert().success().stdout(predicate::str::diff("n\n3\n"));

    Ok(())
}

#[test]
fn test_values_and_with_are_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("csvjoin")?;
    cmd.arg("-q").arg("values (1), (2)").arg("--csv");
    cmd.assert().success();

    let mut cmd = Command::cargo_bin("csvjoin")?;
    cmd.arg("-q")
        .arg("with c as (select 41 + 1 as answer) select answer from c")
        .arg("--csv");
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("answer\n42\n"));

    Ok(())
}

#[test]
fn test_mutating_keyword_warns_but_executes() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let test_file = prepare_test_file(temp_dir.path())?;

    let mut cmd = Command::cargo_bin("csvjoin")?;
    cmd.arg("-t")
        .arg(test_file.to_str().unwrap())
        .arg("-q")
        .arg("select count(*) as n from people where name <> 'delete'")
        .arg("--csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("n\n3\n"))
        .stderr(predicate::str::contains("# warning"))
        .stderr(predicate::str::contains("--adhoc"));

    Ok(())
}

#[test]
fn test_sql_error_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let test_file = prepare_test_file(temp_dir.path())?;

    let mut cmd = Command::cargo_bin("csvjoin")?;
    cmd.arg("-t")
        .arg(test_file.to_str().unwrap())
        .arg("-q")
        .arg("select nope from people");

    cmd.assert()
        .failure()
        .stderr(predicate::str::starts_with("# "));

    Ok(())
}

// Helper function to create a test CSV file
fn prepare_test_file(dir: &std::path::Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file_path = dir.join("people.csv");
    let content = "id,name,age\n1,Alice,30\n2,Bob,25\n3,Charlie,35\n";
    fs::write(&file_path, content)?;
    Ok(file_path)
}
