use crate::error::{Result, ScopeError};
use crate::query_builder::QueryBuilder;
use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc,
};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Epoch values above this magnitude are taken as milliseconds
const EPOCH_MILLIS_THRESHOLD: u64 = 100_000_000_000;

const TEXT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// A time bound as supplied by a caller
#[derive(Debug, Clone, PartialEq)]
pub enum TimeInput {
    Epoch(i64),
    Text(String),
    DateTime(DateTime<Utc>),
    Naive(NaiveDateTime),
    Date(NaiveDate),
}

impl From<i64> for TimeInput {
    fn from(value: i64) -> Self {
        TimeInput::Epoch(value)
    }
}

impl From<&str> for TimeInput {
    fn from(value: &str) -> Self {
        TimeInput::Text(value.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(value: String) -> Self {
        TimeInput::Text(value)
    }
}

impl From<DateTime<Utc>> for TimeInput {
    fn from(value: DateTime<Utc>) -> Self {
        TimeInput::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for TimeInput {
    fn from(value: DateTime<FixedOffset>) -> Self {
        TimeInput::DateTime(value.with_timezone(&Utc))
    }
}

impl From<NaiveDateTime> for TimeInput {
    fn from(value: NaiveDateTime) -> Self {
        TimeInput::Naive(value)
    }
}

impl From<NaiveDate> for TimeInput {
    fn from(value: NaiveDate) -> Self {
        TimeInput::Date(value)
    }
}

/// Normalize an optional bound; blank text counts as no bound
pub fn normalize_bound(input: Option<&TimeInput>) -> Result<Option<DateTime<Utc>>> {
    match input {
        None => Ok(None),
        Some(TimeInput::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(input) => normalize_instant(input).map(Some),
    }
}

/// Convert any supported time input to a UTC instant
pub fn normalize_instant(input: &TimeInput) -> Result<DateTime<Utc>> {
    match input {
        TimeInput::Epoch(value) => from_epoch(*value),
        TimeInput::Text(text) => parse_text(text),
        TimeInput::DateTime(instant) => Ok(*instant),
        TimeInput::Naive(naive) => Ok(naive.and_utc()),
        TimeInput::Date(date) => Ok(start_of_day(*date)),
    }
}

fn from_epoch(value: i64) -> Result<DateTime<Utc>> {
    let instant = if value.unsigned_abs() > EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    };
    instant.ok_or_else(|| ScopeError::Format(format!("Timestamp out of range: {value}")))
}

fn parse_text(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    let numeric = text.strip_prefix('@').unwrap_or(text);

    if let Ok(epoch) = numeric.parse::<i64>() {
        return from_epoch(epoch);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }

    for format in TEXT_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(start_of_day(date));
    }

    Err(ScopeError::Format(format!("Could not parse '{text}' as a date")))
}

/// Render an instant the way it is compared in SQL; microseconds appear only
/// when non-zero
pub fn sql_timestamp(instant: DateTime<Utc>) -> Value {
    let format = if instant.timestamp_subsec_micros() == 0 {
        "%Y-%m-%d %H:%M:%S"
    } else {
        "%Y-%m-%d %H:%M:%S%.6f"
    };
    Value::String(instant.format(format).to_string())
}

/// AND `column >= from` and/or `column <= to`; fails with 422 when `from > to`
pub fn filter_by_time_range(
    mut query: QueryBuilder,
    column: &str,
    from: Option<&TimeInput>,
    to: Option<&TimeInput>,
) -> Result<QueryBuilder> {
    let from = normalize_bound(from)?;
    let to = normalize_bound(to)?;

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(ScopeError::validation(
                "Invalid date range. End date cannot be earlier than start date.",
            ));
        }
    }

    if let Some(from) = from {
        query = query.where_op(column, ">=", sql_timestamp(from));
    }
    if let Some(to) = to {
        query = query.where_op(column, "<=", sql_timestamp(to));
    }

    Ok(query)
}

/// Named periods relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimePeriod {
    Today,
    Last24Hours,
    Yesterday,
    ThisWeek,
    LastWeek,
    Last7Days,
    ThisMonth,
    LastMonth,
    LastOneMonth,
}

/// The predicate a period expands to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodPredicate {
    OnDate(NaiveDate),
    Since(DateTime<Utc>),
    Between(DateTime<Utc>, DateTime<Utc>),
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 9] = [
        TimePeriod::Today,
        TimePeriod::Last24Hours,
        TimePeriod::Yesterday,
        TimePeriod::ThisWeek,
        TimePeriod::LastWeek,
        TimePeriod::Last7Days,
        TimePeriod::ThisMonth,
        TimePeriod::LastMonth,
        TimePeriod::LastOneMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Today => "today",
            TimePeriod::Last24Hours => "24h",
            TimePeriod::Yesterday => "yesterday",
            TimePeriod::ThisWeek => "this_week",
            TimePeriod::LastWeek => "last_week",
            TimePeriod::Last7Days => "7d",
            TimePeriod::ThisMonth => "this_month",
            TimePeriod::LastMonth => "last_month",
            TimePeriod::LastOneMonth => "1month",
        }
    }

    /// Parse an optional period name, defaulting to today
    pub fn parse_optional(period: Option<&str>) -> Result<Self> {
        period.map_or(Ok(TimePeriod::Today), |name| name.parse())
    }

    /// Expand to a predicate relative to `now`.
    ///
    /// `last_week` and `last_month` are closed by the end of the *current*
    /// week or month, so they include the running period too.
    pub fn predicate(&self, now: DateTime<Utc>) -> PeriodPredicate {
        let today = now.date_naive();
        match self {
            TimePeriod::Today => PeriodPredicate::OnDate(today),
            TimePeriod::Last24Hours => PeriodPredicate::Since(now - Duration::hours(24)),
            TimePeriod::Yesterday => PeriodPredicate::OnDate(today - Duration::days(1)),
            TimePeriod::ThisWeek => {
                PeriodPredicate::Between(start_of_week(today), end_of_week(today))
            }
            TimePeriod::LastWeek => PeriodPredicate::Between(
                start_of_week(today - Duration::weeks(1)),
                end_of_week(today),
            ),
            TimePeriod::Last7Days => PeriodPredicate::Since(now - Duration::days(7)),
            TimePeriod::ThisMonth => {
                PeriodPredicate::Between(start_of_month(today), end_of_month(today))
            }
            TimePeriod::LastMonth => PeriodPredicate::Between(
                start_of_month(months_before(today, 1)),
                end_of_month(today),
            ),
            TimePeriod::LastOneMonth => PeriodPredicate::Since(
                now.checked_sub_months(Months::new(1))
                    .unwrap_or(now - Duration::days(30)),
            ),
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self> {
        TimePeriod::ALL
            .into_iter()
            .find(|period| period.as_str() == s)
            .ok_or_else(|| ScopeError::Format(format!("Invalid time period: {s}")))
    }
}

/// AND the predicate `period` expands to at `now`
pub fn filter_by_time_period(
    query: QueryBuilder,
    column: &str,
    period: TimePeriod,
    now: DateTime<Utc>,
) -> QueryBuilder {
    match period.predicate(now) {
        PeriodPredicate::OnDate(date) => query.where_date(column, date),
        PeriodPredicate::Since(from) => query.where_op(column, ">=", sql_timestamp(from)),
        PeriodPredicate::Between(start, end) => {
            query.where_between(column, sql_timestamp(start), sql_timestamp(end))
        }
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Last microsecond of the day
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::microseconds(1)
}

fn start_of_week(date: NaiveDate) -> DateTime<Utc> {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    start_of_day(monday)
}

fn end_of_week(date: NaiveDate) -> DateTime<Utc> {
    let sunday = date + Duration::days(i64::from(6 - date.weekday().num_days_from_monday()));
    end_of_day(sunday)
}

fn start_of_month(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date.with_day(1).unwrap_or(date))
}

fn end_of_month(date: NaiveDate) -> DateTime<Utc> {
    let first = date.with_day(1).unwrap_or(date);
    let next_month = first
        .checked_add_months(Months::new(1))
        .unwrap_or(first + Duration::days(31));
    end_of_day(next_month - Duration::days(1))
}

fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}
