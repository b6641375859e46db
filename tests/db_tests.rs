// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kassabok::db;
use rusqlite::Connection;

#[test]
fn schema_init_is_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kassabok.sqlite");

    let mut conn = Connection::open(&path).unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO persons(name) VALUES('Anna')", [])
        .unwrap();
    drop(conn);

    // Re-opening and re-initializing must not clobber existing data
    let mut conn = Connection::open(&path).unwrap();
    db::init_schema(&mut conn).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM persons", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn decimals_survive_text_round_trip() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO persons(name) VALUES('Anna')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO income_sources(person_id, name, amount, frequency) VALUES(1,'Salary','28900.10','monthly')",
        [],
    )
    .unwrap();

    let records = db::load_records(&conn).unwrap();
    assert_eq!(records.income_sources.len(), 1);
    assert_eq!(
        records.income_sources[0].amount,
        "28900.10".parse::<rust_decimal::Decimal>().unwrap()
    );
}
