//! Concurrency tests for the fitamin binary.
//!
//! These tests verify that multiple processes can safely:
//! - Add meals to the same plan book simultaneously (file locking)
//! - Append BMI measurements simultaneously

use assert_cmd::Command;
use std::fs;
use std::thread;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fitamin"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_concurrent_meal_adds_are_all_persisted() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Thundering herd: every process loads, modifies and saves the same book
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let data_dir = data_dir.clone();
            thread::spawn(move || {
                let name = format!("Menu {}", i);
                cli()
                    .args(["meals", "add", "--date", "2024-04-27"])
                    .args(["--name", name.as_str()])
                    .args(["--calories", "100", "--protein", "5"])
                    .args(["--carbs", "10", "--fat", "2"])
                    .arg("--data-dir")
                    .arg(&data_dir)
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let plans: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(data_dir.join("meal_plans.json")).expect("Failed to read plan book"),
    )
    .expect("Plan book is not valid JSON");

    let meals = plans["plans"][0]["meals"]
        .as_array()
        .expect("meals array");
    assert_eq!(meals.len(), 8, "Expected 8 meals, got {}", meals.len());
}

#[test]
fn test_concurrent_bmi_saves() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let data_dir = data_dir.clone();
            thread::spawn(move || {
                cli()
                    .args(["bmi", "--height", "170", "--weight", "70", "--save"])
                    .arg("--data-dir")
                    .arg(&data_dir)
                    .assert()
                    .success();
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let log = fs::read_to_string(data_dir.join("bmi_history.jsonl")).expect("Failed to read log");
    assert_eq!(log.lines().count(), 5);
    for line in log.lines() {
        serde_json::from_str::<serde_json::Value>(line).expect("Corrupted line in log");
    }
}
