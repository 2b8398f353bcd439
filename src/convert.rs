//! Scalar conversion: the text forms of leaf types.
//!
//! Numeric and character types go through their `FromStr` impl on the
//! trimmed value. Booleans accept the usual spreadsheet spellings, dates and
//! times a handful of common layouts. `String` takes the raw value verbatim.

use std::{fmt::Display, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    coerce::{FitType, Fields, Result},
    error::TypeFittingError,
    schema::MemberKind,
    timespan::TimeSpan,
};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

fn unparseable(value: &str, target: &'static str, reason: impl Display) -> TypeFittingError {
    TypeFittingError::Unparseable {
        value: value.to_string(),
        target,
        reason: reason.to_string(),
    }
}

/// Runs `FromStr` on the trimmed value and maps the failure.
pub fn parse_trimmed<T>(raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|err| unparseable(raw, std::any::type_name::<T>(), err))
}

pub fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Ok(true),
        "false" | "f" | "no" | "n" | "0" => Ok(false),
        _ => Err(unparseable(raw, "bool", "expected true/false, yes/no or 1/0")),
    }
}

fn parse_with_formats<T>(
    raw: &str,
    formats: &[&str],
    target: &'static str,
    parse: impl Fn(&str, &str) -> chrono::ParseResult<T>,
) -> Result<T> {
    let trimmed = raw.trim();
    formats
        .iter()
        .find_map(|fmt| parse(trimmed, *fmt).ok())
        .ok_or_else(|| unparseable(raw, target, "no supported layout matches"))
}

pub fn parse_naive_date(raw: &str) -> Result<NaiveDate> {
    parse_with_formats(raw, DATE_FORMATS, "date", NaiveDate::parse_from_str)
}

pub fn parse_naive_datetime(raw: &str) -> Result<NaiveDateTime> {
    parse_with_formats(raw, DATETIME_FORMATS, "datetime", NaiveDateTime::parse_from_str)
}

pub fn parse_naive_time(raw: &str) -> Result<NaiveTime> {
    parse_with_formats(raw, TIME_FORMATS, "time", NaiveTime::parse_from_str)
}

pub fn parse_guid(raw: &str) -> Result<Uuid> {
    let trimmed = raw.trim().trim_matches(|c| matches!(c, '{' | '}'));
    Uuid::parse_str(trimmed).map_err(|err| unparseable(raw, "guid", err))
}

/// Implements [`FitType`] for a leaf type given its text parser.
#[macro_export]
macro_rules! fit_scalar {
    ($ty:ty => $parse:expr) => {
        impl $crate::FitType for $ty {
            const KIND: $crate::MemberKind = $crate::MemberKind::Scalar;

            fn from_text(raw: &str) -> ::std::option::Option<$crate::coerce::Result<Self>> {
                ::std::option::Option::Some($parse(raw))
            }

            fn fit(fields: &mut $crate::Fields<'_>) -> $crate::coerce::Result<Self> {
                fields.scalar::<Self>()
            }
        }
    };
    ($($ty:ty),+ $(,)?) => {
        $( $crate::fit_scalar!($ty => $crate::convert::parse_trimmed::<$ty>); )+
    };
}

fit_scalar!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, Decimal,
    TimeSpan,
);
fit_scalar!(bool => parse_bool);
fit_scalar!(NaiveDate => parse_naive_date);
fit_scalar!(NaiveDateTime => parse_naive_datetime);
fit_scalar!(NaiveTime => parse_naive_time);
fit_scalar!(Uuid => parse_guid);

impl FitType for String {
    const KIND: MemberKind = MemberKind::Scalar;

    fn from_text(raw: &str) -> Option<Result<Self>> {
        Some(Ok(raw.to_string()))
    }

    fn fit(fields: &mut Fields<'_>) -> Result<Self> {
        fields.scalar::<Self>()
    }
}
