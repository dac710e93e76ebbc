/// Latest valid fiscal start month (December)
pub const MAX_FISCAL_MONTH: u8 = 12;

/// Months in a calendar year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Months in a fiscal quarter
pub const MONTHS_PER_QUARTER: u32 = 3;

/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';

/// Separator in the `YearMonth` column (`"2024/6"`)
pub const YEAR_MONTH_SEPARATOR: char = '/';

/// Suffix in the `FiscalQuarter_0Q` column (`"1Q"`)
pub const QUARTER_SUFFIX: char = 'Q';

/// ISO 8601 date format accepted for date inputs
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Full weekday name, e.g. `"Monday"`
pub const DAY_NAME_FORMAT: &str = "%A";

/// Full month name, e.g. `"January"`
pub const MONTH_NAME_FORMAT: &str = "%B";
