#![allow(dead_code)]

use std::{fs, path::Path};

use flock_domain::{AlertRecord, PersonRecord, TransactionRecord};
use serde::Serialize;
use tempfile::TempDir;
use uuid::Uuid;

fn write<T: Serialize + ?Sized>(path: &Path, records: &T) {
    fs::write(path, serde_json::to_string_pretty(records).unwrap()).expect("write records");
}

/// Creates an isolated data directory seeded with a small congregation for May 2024.
pub fn seeded_data_dir() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    let giver = Uuid::new_v4();
    let other = Uuid::new_v4();

    let mut inactive = PersonRecord::new("Former").with_birth_date("1970-05-15");
    inactive.active = false;
    let people = vec![
        PersonRecord::new("Ana")
            .with_birth_date("1990-05-16")
            .with_gender("female")
            .with_status("member"),
        PersonRecord::new("Bruno")
            .with_birth_date("1985-05-02")
            .with_anniversary_date("2012-05-13")
            .with_gender("male")
            .with_status("leader"),
        PersonRecord::new("Caio")
            .with_birth_date("not a date")
            .with_network("youth")
            .with_status("visitor"),
        inactive,
    ];
    let transactions = vec![
        TransactionRecord::income(100.0, "2024-01-05", "tithe").with_contributor(giver, Some("Ana")),
        TransactionRecord::income(50.0, "2024-01-20", "tithe").with_contributor(giver, Some("Ana")),
        TransactionRecord::income(200.0, "2024-02-01", "tithe").with_contributor(giver, Some("Ana")),
        TransactionRecord::income(400.0, "2024-05-03", "tithe")
            .with_contributor(other, Some("Bruno")),
        TransactionRecord::income(75.0, "2024-05-03", "offering")
            .with_contributor(other, Some("Bruno")),
        TransactionRecord::income(10.0, "2022-01-01", "tithe").with_contributor(giver, Some("Ana")),
    ];
    let alerts = vec![AlertRecord::new("Prayer meeting", "Thursday at 8pm")];

    write(&dir.path().join("people.json"), &people);
    write(&dir.path().join("transactions.json"), &transactions);
    write(&dir.path().join("alerts.json"), &alerts);
    dir
}
