use chrono::NaiveDate;
use std::str::FromStr;
use thiserror::Error;

/// Search criteria shared by every provider.
///
/// Each field is optional on its own: an empty `keywords`, an empty `address`
/// or a missing `month` simply drops the matching upstream parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub keywords: Vec<String>,
    pub address: String,
    pub month: Option<YearMonth>,
}

impl Query {
    pub fn new(keywords: Vec<String>, address: String, month: Option<YearMonth>) -> Self {
        Self {
            keywords,
            address,
            month,
        }
    }

    /// Keywords followed by the address, when there is one.
    ///
    /// Neither provider has a dedicated location filter, so the address is
    /// sent as one more free-text term.
    pub fn search_terms(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .chain((!self.address.is_empty()).then_some(self.address.as_str()))
    }
}

/// A calendar month, stored as the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid month '{0}', expected YYYY-MM or YYYYMM")]
    InvalidMonth(String),
}

/// Accepts `YYYY-MM` and `YYYYMM`.
impl FromStr for YearMonth {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || QueryError::InvalidMonth(s.to_string());
        let trimmed = s.trim();

        let (year, month) = match trimmed.split_once('-') {
            Some((year, month)) => (year, month),
            None if trimmed.len() == 6 && trimmed.is_char_boundary(4) => trimmed.split_at(4),
            None => return Err(invalid()),
        };

        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        YearMonth::new(year, month).ok_or_else(invalid)
    }
}
