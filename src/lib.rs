mod consts;
mod fiscal;
mod prelude;
mod range;

pub use consts::*;
pub use fiscal::{FiscalConfig, FiscalMonth};
pub use range::DateRange;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Error type for calendar table generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Date input could not be parsed as ISO 8601 (`YYYY-MM-DD`).
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    /// End date precedes start date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Fiscal start month outside `1..=MAX_FISCAL_MONTH`.
    #[error("Invalid fiscal month: {0} (must be 1-{MAX_FISCAL_MONTH})")]
    InvalidFiscalMonth(u8),

    /// A first fiscal year was supplied without a fiscal start month.
    #[error("Inconsistent fiscal parameters: first fiscal year requires a fiscal start month")]
    InconsistentFiscalParams,
}

/// One row of a calendar dimension table: a single calendar day with all
/// derived attributes, ready to join against fact tables.
///
/// Serializes under conventional dimension-table column names (`Date`,
/// `Year`, ..., `FiscalQuarter_0Q`). The fiscal column group is present on
/// every row or absent from every row, depending on whether a [`FiscalConfig`]
/// was supplied at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRow {
    /// The calendar date for this row
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Calendar year
    #[serde(rename = "Year")]
    pub year: i32,
    /// Calendar month (1-12)
    #[serde(rename = "Month")]
    pub month: u32,
    /// Day of month (1-31)
    #[serde(rename = "Day")]
    pub day: u32,
    /// ISO week number (1-53); near year boundaries this is the week of the
    /// neighboring ISO year
    #[serde(rename = "Week")]
    pub week: u32,
    /// Day of week, Monday=1 through Sunday=7
    #[serde(rename = "DayOfWeek")]
    pub day_of_week: u32,
    /// Full weekday name, e.g. `"Monday"`
    #[serde(rename = "NameOfDay")]
    pub name_of_day: String,
    /// Full month name, e.g. `"January"`
    #[serde(rename = "NameOfMonth")]
    pub name_of_month: String,
    /// `"{year}/{month}"`, month not zero-padded
    #[serde(rename = "YearMonth")]
    pub year_month: String,
    /// Whole days between this date and today (signed)
    #[serde(rename = "RelativeDate")]
    pub relative_date: i64,
    /// Calendar-month boundaries between this date and today (signed)
    #[serde(rename = "RelativeMonth")]
    pub relative_month: i32,
    /// Calendar years between this date and today (signed)
    #[serde(rename = "RelativeYear")]
    pub relative_year: i32,
    /// Fiscal column group, `Some` iff a [`FiscalConfig`] was supplied
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub fiscal: Option<FiscalFields>,
}

/// Fiscal column group attached to every row when a [`FiscalConfig`] is
/// supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalFields {
    /// Fiscal year containing the row's date
    #[serde(rename = "FY")]
    pub fy: i32,
    /// Fiscal quarter within the fiscal year (1-4)
    #[serde(rename = "FiscalQuarter")]
    pub fiscal_quarter: u32,
    /// `"{FiscalQuarter}Q"`
    #[serde(rename = "FiscalQuarter_0Q")]
    pub fiscal_quarter_0q: String,
    /// Fiscal years between the row's fiscal year and today's fiscal year
    #[serde(rename = "RelativeFiscalYear")]
    pub relative_fiscal_year: i32,
    /// Accounting column group, `Some` iff the config carries a first fiscal year
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub accounting: Option<AccountingFields>,
}

/// Accounting-period column group, counted from the configured first fiscal
/// year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingFields {
    /// Fiscal years elapsed since the first fiscal year (period 0)
    #[serde(rename = "AccountingPeriod")]
    pub accounting_period: i32,
    /// `AccountingPeriod` minus today's accounting period
    #[serde(rename = "RelativeAccountingPeriod")]
    pub relative_accounting_period: i32,
}

impl CalendarRow {
    /// Derives every calendar field for a single date, with all relative
    /// columns measured against `today`.
    pub fn build(date: NaiveDate, today: NaiveDate, fiscal: Option<FiscalConfig>) -> Self {
        let year = date.year();
        let month = date.month();
        Self {
            date,
            year,
            month,
            day: date.day(),
            week: date.iso_week().week(),
            day_of_week: date.weekday().number_from_monday(),
            name_of_day: date.format(DAY_NAME_FORMAT).to_string(),
            name_of_month: date.format(MONTH_NAME_FORMAT).to_string(),
            year_month: format!("{year}{YEAR_MONTH_SEPARATOR}{month}"),
            relative_date: date.signed_duration_since(today).num_days(),
            relative_month: months_between(date, today),
            relative_year: year - today.year(),
            fiscal: fiscal.map(|config| FiscalFields::build(&config, date, today)),
        }
    }
}

impl FiscalFields {
    fn build(config: &FiscalConfig, date: NaiveDate, today: NaiveDate) -> Self {
        let fy = config.fiscal_year(date);
        let quarter = config.fiscal_quarter(date);
        Self {
            fy,
            fiscal_quarter: quarter,
            fiscal_quarter_0q: format!("{quarter}{QUARTER_SUFFIX}"),
            // Today's fiscal year is derived with the same start month as fy,
            // so the offset is consistent for any fiscal calendar.
            relative_fiscal_year: fy - config.fiscal_year(today),
            accounting: config
                .accounting_period(date)
                .zip(config.accounting_period(today))
                .map(|(period, current)| AccountingFields {
                    accounting_period: period,
                    relative_accounting_period: period - current,
                }),
        }
    }
}

/// Signed count of calendar-month boundaries between `date` and `today`.
fn months_between(date: NaiveDate, today: NaiveDate) -> i32 {
    (date.year() - today.year()) * MONTHS_PER_YEAR as i32
        + (date.month() as i32 - today.month() as i32)
}

/// Parses an ISO 8601 (`YYYY-MM-DD`) date string.
///
/// # Errors
/// Returns `CalendarError::InvalidDateFormat` if the string is not a valid
/// calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| CalendarError::InvalidDateFormat(s.to_owned()))
}

/// Generates the calendar dimension table for `range`, sampling the local
/// clock once for "today".
///
/// One row per day, ascending, both endpoints included.
pub fn generate(range: DateRange, fiscal: Option<FiscalConfig>) -> Vec<CalendarRow> {
    generate_with_today(range, fiscal, Local::now().date_naive())
}

/// Generates the calendar dimension table with an explicit "today".
///
/// Every relative column (`RelativeDate`, `RelativeMonth`, `RelativeYear`,
/// `RelativeFiscalYear`, `RelativeAccountingPeriod`) is measured against the
/// same `today` for every row, so the output is fully deterministic.
pub fn generate_with_today(
    range: DateRange,
    fiscal: Option<FiscalConfig>,
    today: NaiveDate,
) -> Vec<CalendarRow> {
    range
        .days()
        .map(|date| CalendarRow::build(date, today, fiscal))
        .collect()
}

/// Convenience entry point taking raw string dates and optional fiscal
/// parameters, validated fail-fast before any row is built.
///
/// `today` defaults to the local clock when `None`.
///
/// # Errors
/// Returns `CalendarError::InvalidDateFormat` if a date string does not
/// parse, `CalendarError::InvalidRange` if `end_date` precedes `start_date`,
/// `CalendarError::InvalidFiscalMonth` if `start_fiscal_month` is outside
/// `1..=12`, and `CalendarError::InconsistentFiscalParams` if
/// `first_fiscal_year` is given without `start_fiscal_month`.
pub fn generate_from_args(
    start_date: &str,
    end_date: &str,
    first_fiscal_year: Option<i32>,
    start_fiscal_month: Option<u8>,
    today: Option<NaiveDate>,
) -> Result<Vec<CalendarRow>, CalendarError> {
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;
    let range = DateRange::new(start, end)?;
    let fiscal = FiscalConfig::from_parts(start_fiscal_month, first_fiscal_year)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    Ok(generate_with_today(range, fiscal, today))
}
