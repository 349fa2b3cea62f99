use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use sqlwindow_common::error::{Error, Result};
use sqlwindow_common::types::Value;

/// Shifts a RANGE key by `offset` units, saturating at the type's limits.
/// Units are the value itself for numbers, days for DATE and seconds for
/// TIME, DATETIME and TIMESTAMP.
pub(crate) fn shift_value(value: &Value, offset: i64, backwards: bool) -> Result<Value> {
    Ok(match value {
        Value::Null => Value::Null,
        Value::Int64(v) => Value::Int64(if backwards {
            v.saturating_sub(offset)
        } else {
            v.saturating_add(offset)
        }),
        Value::Float64(v) => Value::float64(if backwards {
            v.0 - offset as f64
        } else {
            v.0 + offset as f64
        }),
        Value::Numeric(v) => {
            let delta = Decimal::from(offset);
            let shifted = if backwards {
                v.checked_sub(delta)
            } else {
                v.checked_add(delta)
            };
            Value::Numeric(shifted.unwrap_or(if backwards {
                Decimal::MIN
            } else {
                Decimal::MAX
            }))
        }
        Value::Date(v) => Value::Date(shift_date(*v, offset, backwards)),
        Value::Time(v) => Value::Time(shift_time(*v, offset, backwards)),
        Value::DateTime(v) => Value::DateTime(shift_datetime(*v, offset, backwards)),
        Value::Timestamp(v) => Value::Timestamp(shift_timestamp(*v, offset, backwards)),
        Value::Bool(_) | Value::String(_) | Value::Bytes(_) => {
            return Err(Error::unsupported_range_type(value.data_type().to_string()));
        }
    })
}

fn signed(delta: TimeDelta, backwards: bool) -> TimeDelta {
    if backwards { -delta } else { delta }
}

fn shift_date(v: NaiveDate, days: i64, backwards: bool) -> NaiveDate {
    let limit = if backwards {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    };
    TimeDelta::try_days(days)
        .and_then(|delta| v.checked_add_signed(signed(delta, backwards)))
        .unwrap_or(limit)
}

fn shift_time(v: NaiveTime, seconds: i64, backwards: bool) -> NaiveTime {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    let limit = if backwards { NaiveTime::MIN } else { last };
    match TimeDelta::try_seconds(seconds) {
        Some(delta) => {
            let (shifted, wrapped) = v.overflowing_add_signed(signed(delta, backwards));
            if wrapped == 0 { shifted } else { limit }
        }
        None => limit,
    }
}

fn shift_datetime(v: NaiveDateTime, seconds: i64, backwards: bool) -> NaiveDateTime {
    let limit = if backwards {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    };
    TimeDelta::try_seconds(seconds)
        .and_then(|delta| v.checked_add_signed(signed(delta, backwards)))
        .unwrap_or(limit)
}

fn shift_timestamp(v: DateTime<Utc>, seconds: i64, backwards: bool) -> DateTime<Utc> {
    let limit = if backwards {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    };
    TimeDelta::try_seconds(seconds)
        .and_then(|delta| v.checked_add_signed(signed(delta, backwards)))
        .unwrap_or(limit)
}
