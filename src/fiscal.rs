use crate::CalendarError;
use crate::consts::{MAX_FISCAL_MONTH, MONTHS_PER_QUARTER, MONTHS_PER_YEAR};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// The month a fiscal year starts in, guaranteed to be in the range `1..=12`.
/// Uses `NonZeroU8` internally, so 0 is not a valid fiscal month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FiscalMonth(NonZeroU8);

impl FiscalMonth {
    /// Creates a new `FiscalMonth`, validating that it's non-zero and <= `MAX_FISCAL_MONTH`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidFiscalMonth` if the value is 0 or > `MAX_FISCAL_MONTH`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::InvalidFiscalMonth(value))?;
        if value > MAX_FISCAL_MONTH {
            return Err(CalendarError::InvalidFiscalMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for FiscalMonth {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FiscalMonth> for u8 {
    fn from(month: FiscalMonth) -> Self {
        month.0.get()
    }
}

impl fmt::Display for FiscalMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fiscal calendar configuration: the month the fiscal year starts in, and
/// optionally a first fiscal year used as the zero point for accounting
/// periods.
///
/// A fiscal year is labeled by the calendar year it starts in: with an April
/// start, 2024-04-01 through 2025-03-31 is fiscal year 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalConfig {
    start_month: FiscalMonth,
    first_fiscal_year: Option<i32>,
}

impl FiscalConfig {
    /// Creates a fiscal configuration with no accounting-period baseline.
    pub const fn new(start_month: FiscalMonth) -> Self {
        Self {
            start_month,
            first_fiscal_year: None,
        }
    }

    /// Sets the first fiscal year, enabling accounting-period columns.
    #[must_use]
    pub const fn with_first_fiscal_year(mut self, year: i32) -> Self {
        self.first_fiscal_year = Some(year);
        self
    }

    /// Builds a configuration from raw optional parameters.
    ///
    /// Returns `Ok(None)` when neither parameter is given.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidFiscalMonth` if `start_fiscal_month` is
    /// outside `1..=12`, and `CalendarError::InconsistentFiscalParams` if
    /// `first_fiscal_year` is given without `start_fiscal_month`.
    pub fn from_parts(
        start_fiscal_month: Option<u8>,
        first_fiscal_year: Option<i32>,
    ) -> Result<Option<Self>, CalendarError> {
        match (start_fiscal_month, first_fiscal_year) {
            (Some(month), first) => {
                let start_month = FiscalMonth::new(month)?;
                Ok(Some(Self {
                    start_month,
                    first_fiscal_year: first,
                }))
            }
            (None, Some(_)) => Err(CalendarError::InconsistentFiscalParams),
            (None, None) => Ok(None),
        }
    }

    /// Returns the fiscal start month
    pub const fn start_month(&self) -> FiscalMonth {
        self.start_month
    }

    /// Returns the first fiscal year, if configured
    pub const fn first_fiscal_year(&self) -> Option<i32> {
        self.first_fiscal_year
    }

    /// Fiscal year containing `date`: the calendar year the fiscal year
    /// started in.
    pub fn fiscal_year(&self, date: NaiveDate) -> i32 {
        if date.month() >= u32::from(self.start_month.get()) {
            date.year()
        } else {
            date.year() - 1
        }
    }

    /// Fiscal quarter of `date` within its fiscal year, always in `1..=4`.
    pub fn fiscal_quarter(&self, date: NaiveDate) -> u32 {
        let start = u32::from(self.start_month.get());
        (date.month() + MONTHS_PER_YEAR - start) % MONTHS_PER_YEAR / MONTHS_PER_QUARTER + 1
    }

    /// Number of whole fiscal years between `date` and the first fiscal year.
    /// The first fiscal year itself is period 0.
    ///
    /// Returns `None` when no first fiscal year is configured.
    pub fn accounting_period(&self, date: NaiveDate) -> Option<i32> {
        self.first_fiscal_year
            .map(|first| self.fiscal_year(date) - first)
    }
}
