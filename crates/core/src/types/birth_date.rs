//! Date-of-birth type.

use core::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::validate;

/// Errors that can occur when parsing a [`BirthDate`].
///
/// The variants are ordered the way the checks run: format first, then
/// calendar validity, then the future check.
#[derive(thiserror::Error, Debug, Clone)]
pub enum BirthDateError {
    /// The input is not exactly `YYYY-MM-DD`.
    #[error("date of birth must be in YYYY-MM-DD format")]
    InvalidFormat,
    /// The components do not denote a real calendar day.
    #[error("date of birth is not a valid calendar date")]
    NotACalendarDay,
    /// The date is today or later.
    #[error("date of birth cannot be a future date")]
    NotInPast,
}

/// A validated date of birth.
///
/// Guaranteed to be a real calendar day strictly earlier than the day it was
/// parsed on. The current date is rejected, not just later dates: the check
/// is a strict `<` against local midnight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Parse a `BirthDate`, checking format, calendar validity, and the
    /// not-in-future rule against the given `today`.
    ///
    /// # Errors
    ///
    /// Returns the error for the first check that fails, in the order the
    /// variants of [`BirthDateError`] are declared.
    pub fn parse_at(s: &str, today: NaiveDate) -> Result<Self, BirthDateError> {
        if !validate::dob_format(s) {
            return Err(BirthDateError::InvalidFormat);
        }

        let Some(date) = validate::parse_calendar_date(s) else {
            return Err(BirthDateError::NotACalendarDay);
        };

        if date >= today {
            return Err(BirthDateError::NotInPast);
        }

        Ok(Self(date))
    }

    /// Parse a `BirthDate` against the local calendar date.
    ///
    /// # Errors
    ///
    /// See [`BirthDate::parse_at`].
    pub fn parse(s: &str) -> Result<Self, BirthDateError> {
        Self::parse_at(s, Local::now().date_naive())
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<BirthDate> for NaiveDate {
    fn from(dob: BirthDate) -> Self {
        dob.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for BirthDate {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <NaiveDate as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <NaiveDate as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for BirthDate {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let date = <NaiveDate as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(date))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for BirthDate {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <NaiveDate as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
