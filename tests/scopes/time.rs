use crate::common::{fixed_now, test_context};
use chrono::{NaiveDate, TimeZone, Utc};
use model_scopes::error::ScopeError;
use model_scopes::scopes::TimeInput;

#[test]
fn test_time_range_bounds() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let query = users
        .filter_by_time_range(
            users.query(),
            "created_at",
            Some(TimeInput::from("2024-01-01")),
            Some(TimeInput::from(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())),
            None,
        )
        .unwrap();
    assert_eq!(
        query.build_sql(),
        "SELECT * FROM users WHERE users.created_at >= '2024-01-01 00:00:00' AND users.created_at <= '2024-02-01 00:00:00'"
    );
}

#[test]
fn test_time_range_accepts_epoch_seconds_and_millis() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let query = users
        .filter_by_time_range(
            users.query(),
            "created_at",
            Some(TimeInput::from(1_704_067_200_i64)),
            Some(TimeInput::from(1_704_153_600_000_i64)),
            Some("u"),
        )
        .unwrap();
    assert_eq!(
        query.build_sql(),
        "SELECT * FROM users WHERE u.created_at >= '2024-01-01 00:00:00' AND u.created_at <= '2024-01-02 00:00:00'"
    );
}

#[test]
fn test_open_ended_and_blank_bounds() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let query = users
        .filter_by_time_range(
            users.query(),
            "created_at",
            None,
            Some(TimeInput::from(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())),
            None,
        )
        .unwrap();
    assert_eq!(
        query.build_sql(),
        "SELECT * FROM users WHERE users.created_at <= '2024-03-01 12:00:00'"
    );

    let query = users
        .filter_by_time_range(users.query(), "created_at", Some(TimeInput::from("")), None, None)
        .unwrap();
    assert_eq!(query, users.query());
}

#[test]
fn test_inverted_range_is_a_validation_error() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let err = users
        .filter_by_time_range(
            users.query(),
            "created_at",
            Some(TimeInput::from("2024-02-01")),
            Some(TimeInput::from("2024-01-01")),
            None,
        )
        .unwrap_err();

    assert_eq!(err.status_code(), 422);
    assert!(matches!(err, ScopeError::Validation { .. }));
    assert!(err
        .to_string()
        .contains("End date cannot be earlier than start date"));
}

#[test]
fn test_unparseable_bound_is_a_format_error() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    let result = users.filter_by_time_range(
        users.query(),
        "created_at",
        Some(TimeInput::from("next tuesday-ish")),
        None,
        None,
    );
    assert!(matches!(result, Err(ScopeError::Format(_))));
}

fn period_sql(period: Option<&str>) -> String {
    let context = test_context();
    let users = context.scope("users").unwrap();
    users
        .filter_by_time_period(users.query(), "created_at", period, None)
        .unwrap()
        .build_sql()
        .trim_start_matches("SELECT * FROM users WHERE ")
        .to_string()
}

#[test]
fn test_periods_against_fixed_clock() {
    // fixed_now() is Wednesday 2024-03-13 15:30:00
    assert_eq!(fixed_now().format("%A").to_string(), "Wednesday");

    let cases = [
        (None, "DATE(users.created_at) = '2024-03-13'"),
        (Some("today"), "DATE(users.created_at) = '2024-03-13'"),
        (Some("24h"), "users.created_at >= '2024-03-12 15:30:00'"),
        (Some("yesterday"), "DATE(users.created_at) = '2024-03-12'"),
        (
            Some("this_week"),
            "users.created_at BETWEEN '2024-03-11 00:00:00' AND '2024-03-17 23:59:59.999999'",
        ),
        (
            Some("last_week"),
            "users.created_at BETWEEN '2024-03-04 00:00:00' AND '2024-03-17 23:59:59.999999'",
        ),
        (Some("7d"), "users.created_at >= '2024-03-06 15:30:00'"),
        (
            Some("this_month"),
            "users.created_at BETWEEN '2024-03-01 00:00:00' AND '2024-03-31 23:59:59.999999'",
        ),
        (
            Some("last_month"),
            "users.created_at BETWEEN '2024-02-01 00:00:00' AND '2024-03-31 23:59:59.999999'",
        ),
        (Some("1month"), "users.created_at >= '2024-02-13 15:30:00'"),
    ];

    for (period, expected) in cases {
        assert_eq!(period_sql(period), expected, "period {period:?}");
    }
}

#[test]
fn test_unknown_period_is_a_format_error() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    for period in ["fortnight", "TODAY", ""] {
        let result =
            users.filter_by_time_period(users.query(), "created_at", Some(period), None);
        assert!(
            matches!(result, Err(ScopeError::Format(_))),
            "period {period:?} should be rejected"
        );
    }
}

#[test]
fn test_out_of_range_epoch_text_is_a_format_error() {
    let context = test_context();
    let users = context.scope("users").unwrap();

    for bound in ["-9223372036854775808", "9223372036854775807"] {
        let result = users.filter_by_time_range(
            users.query(),
            "created_at",
            Some(TimeInput::from(bound)),
            None,
            None,
        );
        assert!(matches!(result, Err(ScopeError::Format(_))), "bound {bound}");
    }
}
