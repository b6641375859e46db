// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use kassabok::{cli, commands, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("person", sub)) => commands::persons::handle(conn, sub),
        Some(("income", sub)) => commands::income::handle(conn, sub),
        Some(("expense", sub)) => commands::expenses::handle(conn, sub),
        Some(("budget", sub)) => commands::budgets::handle(conn, sub),
        Some(("loan", sub)) => commands::loans::handle(conn, sub),
        Some(("savings", sub)) => commands::savings::handle(conn, sub),
        Some(("goal", sub)) => commands::goals::handle(conn, sub),
        Some(("health", sub)) => commands::health::handle(conn, sub),
        Some(("prefs", sub)) => commands::prefs::handle(conn, sub),
        Some(("scenario", sub)) => commands::scenarios::handle(conn, sub),
        _ => panic!("command not parsed"),
    }
}

#[test]
fn person_and_income_round_trip() {
    let conn = setup();
    run(&conn, &["kassabok", "person", "add", "--name", " Anna ", "--age", "34"]).unwrap();
    run(
        &conn,
        &[
            "kassabok", "income", "add", "--person", "Anna", "--name", "Salary", "--amount",
            "28900", "--frequency", "monthly",
        ],
    )
    .unwrap();

    let out = commands::health::report_for(&conn, 3).unwrap();
    assert_eq!(out.totals.combined.monthly_income, Decimal::from(28900));
}

#[test]
fn yearly_income_normalizes_in_report() {
    let conn = setup();
    run(&conn, &["kassabok", "person", "add", "--name", "Anna"]).unwrap();
    run(&conn, &["kassabok", "person", "add", "--name", "Bjorn"]).unwrap();
    run(
        &conn,
        &[
            "kassabok", "income", "add", "--person", "Anna", "--name", "Salary", "--amount",
            "28900", "--frequency", "monthly",
        ],
    )
    .unwrap();
    run(
        &conn,
        &[
            "kassabok", "income", "add", "--person", "Bjorn", "--name", "Salary", "--amount",
            "405600", "--frequency", "yearly",
        ],
    )
    .unwrap();

    let out = commands::health::report_for(&conn, 3).unwrap();
    assert_eq!(out.totals.combined.monthly_income, Decimal::from(62700));
}

#[test]
fn unknown_frequency_rejected_on_insert() {
    let conn = setup();
    run(&conn, &["kassabok", "person", "add", "--name", "Anna"]).unwrap();
    let err = run(
        &conn,
        &[
            "kassabok", "income", "add", "--person", "Anna", "--name", "Salary", "--amount",
            "100", "--frequency", "fortnightly",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unknown frequency"));
}

#[test]
fn non_numeric_amount_rejected_on_insert() {
    let conn = setup();
    run(&conn, &["kassabok", "person", "add", "--name", "Anna"]).unwrap();
    let err = run(
        &conn,
        &[
            "kassabok", "income", "add", "--person", "Anna", "--name", "Salary", "--amount",
            "lots", "--frequency", "monthly",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid decimal"));
}

#[test]
fn removing_person_cascades_to_owned_records() {
    let conn = setup();
    run(&conn, &["kassabok", "person", "add", "--name", "Anna"]).unwrap();
    run(
        &conn,
        &[
            "kassabok", "income", "add", "--person", "Anna", "--name", "Salary", "--amount",
            "100", "--frequency", "monthly",
        ],
    )
    .unwrap();
    run(
        &conn,
        &[
            "kassabok", "loan", "add", "--person", "Anna", "--name", "Car", "--original",
            "1000", "--balance", "800", "--rate", "4.5", "--payment", "50",
        ],
    )
    .unwrap();
    run(&conn, &["kassabok", "person", "rm", "--name", "Anna"]).unwrap();

    let incomes: i64 = conn
        .query_row("SELECT COUNT(*) FROM income_sources", [], |r| r.get(0))
        .unwrap();
    let loans: i64 = conn
        .query_row("SELECT COUNT(*) FROM loans", [], |r| r.get(0))
        .unwrap();
    assert_eq!(incomes, 0);
    assert_eq!(loans, 0);
}

#[test]
fn inactive_income_excluded_from_totals() {
    let conn = setup();
    run(&conn, &["kassabok", "person", "add", "--name", "Anna"]).unwrap();
    run(
        &conn,
        &[
            "kassabok", "income", "add", "--person", "Anna", "--name", "Side gig", "--amount",
            "5000", "--frequency", "monthly", "--inactive",
        ],
    )
    .unwrap();
    let out = commands::health::report_for(&conn, 3).unwrap();
    assert_eq!(out.totals.combined.monthly_income, Decimal::ZERO);

    let id: i64 = conn
        .query_row("SELECT id FROM income_sources LIMIT 1", [], |r| r.get(0))
        .unwrap();
    run(
        &conn,
        &[
            "kassabok",
            "income",
            "set-active",
            "--id",
            &id.to_string(),
            "--active",
            "true",
        ],
    )
    .unwrap();
    let out = commands::health::report_for(&conn, 3).unwrap();
    assert_eq!(out.totals.combined.monthly_income, Decimal::from(5000));
}

#[test]
fn goal_progress_over_linked_accounts() {
    let conn = setup();
    run(&conn, &["kassabok", "person", "add", "--name", "Anna"]).unwrap();
    run(
        &conn,
        &[
            "kassabok", "savings", "add", "--person", "Anna", "--name", "Buffer", "--balance",
            "250",
        ],
    )
    .unwrap();
    run(
        &conn,
        &[
            "kassabok", "savings", "add", "--person", "Anna", "--name", "Resekonto",
            "--balance", "150",
        ],
    )
    .unwrap();
    run(
        &conn,
        &["kassabok", "goal", "add", "--name", "Vacation", "--target", "1000"],
    )
    .unwrap();
    run(
        &conn,
        &["kassabok", "goal", "link", "--goal", "Vacation", "--account", "Buffer"],
    )
    .unwrap();
    run(
        &conn,
        &["kassabok", "goal", "link", "--goal", "Vacation", "--account", "Resekonto"],
    )
    .unwrap();

    let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let rows = commands::goals::progress_rows(
        &conn,
        Some("200".parse::<Decimal>().unwrap()),
        today,
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].current_amount, Decimal::from(400));
    assert_eq!(rows[0].estimated_months_to_goal, Some(3));
    assert_eq!(
        rows[0].estimated_completion_date,
        NaiveDate::from_ymd_opt(2026, 4, 15)
    );
}

#[test]
fn budget_set_upserts() {
    let conn = setup();
    run(
        &conn,
        &["kassabok", "budget", "set", "--category", "groceries", "--amount", "4000"],
    )
    .unwrap();
    run(
        &conn,
        &["kassabok", "budget", "set", "--category", "groceries", "--amount", "4500"],
    )
    .unwrap();
    let rows = commands::budgets::query_rows(&conn).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, Decimal::from(4500));
    assert!(rows[0].is_fixed);

    let out = commands::health::report_for(&conn, 3).unwrap();
    assert_eq!(out.totals.combined.monthly_expenses, Decimal::from(4500));
}

#[test]
fn prefs_validation_and_defaults() {
    let conn = setup();
    assert_eq!(kassabok::utils::get_locale(&conn).unwrap(), "en");
    assert_eq!(kassabok::utils::get_currency(&conn).unwrap(), "USD");

    run(
        &conn,
        &["kassabok", "prefs", "set", "--locale", "sv", "--currency", "sek"],
    )
    .unwrap();
    assert_eq!(kassabok::utils::get_locale(&conn).unwrap(), "sv");
    assert_eq!(kassabok::utils::get_currency(&conn).unwrap(), "SEK");

    let err = kassabok::utils::set_currency(&conn, "EUR").unwrap_err();
    assert!(err.to_string().contains("Unsupported currency"));
}

#[test]
fn scenario_modification_payload_validated() {
    let conn = setup();
    run(&conn, &["kassabok", "scenario", "add", "--name", "raise"]).unwrap();
    run(
        &conn,
        &[
            "kassabok",
            "scenario",
            "modify",
            "--scenario",
            "raise",
            "--date",
            "2026-03-01",
            "--payload",
            r#"{"kind":"income_change","monthly_delta":"500"}"#,
        ],
    )
    .unwrap();
    let err = run(
        &conn,
        &[
            "kassabok",
            "scenario",
            "modify",
            "--scenario",
            "raise",
            "--date",
            "2026-03-01",
            "--payload",
            r#"{"kind":"lottery_win"}"#,
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid modification payload"));

    let scenario_id: i64 = conn
        .query_row("SELECT id FROM scenarios WHERE name='raise'", [], |r| {
            r.get(0)
        })
        .unwrap();
    let mods = commands::scenarios::load_modifications(&conn, scenario_id).unwrap();
    assert_eq!(mods.len(), 1);
}

#[test]
fn doctor_flags_unknown_frequency_rows() {
    let conn = setup();
    conn.execute("INSERT INTO persons(name) VALUES('Anna')", [])
        .unwrap();
    // Bypass validation the way a hand-edited database would
    conn.execute(
        "INSERT INTO income_sources(person_id, name, amount, frequency) VALUES(1,'Odd','100','fortnightly')",
        [],
    )
    .unwrap();
    let issues = commands::doctor::collect_issues(&conn).unwrap();
    assert!(issues
        .iter()
        .any(|row| row[0] == "unknown_frequency" && row[1].contains("fortnightly")));

    // The calculators silently skip the bad row
    let out = commands::health::report_for(&conn, 3).unwrap();
    assert_eq!(out.totals.combined.monthly_income, Decimal::ZERO);
}

#[test]
fn scenario_projection_from_live_records() {
    let conn = setup();
    run(&conn, &["kassabok", "person", "add", "--name", "Anna"]).unwrap();
    run(
        &conn,
        &[
            "kassabok", "income", "add", "--person", "Anna", "--name", "Salary", "--amount",
            "1000", "--frequency", "monthly",
        ],
    )
    .unwrap();
    run(&conn, &["kassabok", "scenario", "add", "--name", "base"]).unwrap();
    let points = commands::scenarios::project_scenario(
        &conn,
        "base",
        6,
        rust_decimal::Decimal::ZERO,
    )
    .unwrap();
    assert_eq!(points.len(), 6);
    assert_eq!(points[5].total_savings, Decimal::from(6000));

    let empty = commands::scenarios::project_scenario(&conn, "missing", 6, Decimal::ZERO);
    assert!(empty.is_err());
}

#[test]
fn expense_household_level_needs_no_owner() {
    let conn = setup();
    run(
        &conn,
        &[
            "kassabok", "expense", "add", "--name", "Rent", "--amount", "9000", "--frequency",
            "monthly", "--category", "housing",
        ],
    )
    .unwrap();
    let out = commands::health::report_for(&conn, 3).unwrap();
    assert_eq!(out.totals.combined.monthly_expenses, Decimal::from(9000));
    assert_eq!(out.totals.household_monthly_expenses, Decimal::from(9000));
}
