//! Excel serial-date conversions (spec §3 `dateSystem`, §4.8 item 6).
//!
//! Excel's "1900" date system treats day 1 as 1899-12-31 and, for
//! backward compatibility with Lotus 1-2-3, pretends 1900 was a leap
//! year (serial 60 is the non-existent 1900-02-29). The "1904" system
//! has no such bug; its epoch is 1904-01-01 = serial 0.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSystem {
    Excel1900,
    Excel1904,
}

impl DateSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            DateSystem::Excel1900 => "1900",
            DateSystem::Excel1904 => "1904",
        }
    }
}

/// Convert an Excel serial date (1900 system) to a calendar date. Returns
/// `None` for the fictitious 1900-02-29 (serial 60) and other
/// out-of-range serials.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    serial_to_date_system(serial, DateSystem::Excel1900)
}

pub fn serial_to_date_system(serial: f64, system: DateSystem) -> Option<NaiveDate> {
    let days = serial.floor() as i64;
    match system {
        DateSystem::Excel1900 => {
            if days == 60 {
                return None; // 1900-02-29 never existed
            }
            let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
            let adjust = if days > 60 { days - 1 } else { days };
            epoch.checked_add_signed(chrono::Duration::days(adjust))
        }
        DateSystem::Excel1904 => {
            let epoch = NaiveDate::from_ymd_opt(1904, 1, 1)?;
            epoch.checked_add_signed(chrono::Duration::days(days))
        }
    }
}

/// Convert a calendar date to its Excel 1900-system serial number.
pub fn date_to_serial(date: NaiveDate) -> f64 {
    date_to_serial_system(date, DateSystem::Excel1900)
}

pub fn date_to_serial_system(date: NaiveDate, system: DateSystem) -> f64 {
    match system {
        DateSystem::Excel1900 => {
            let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
            let mut days = (date - epoch).num_days();
            if days >= 60 {
                days += 1;
            }
            days as f64
        }
        DateSystem::Excel1904 => {
            let epoch = NaiveDate::from_ymd_opt(1904, 1, 1).unwrap();
            (date - epoch).num_days() as f64
        }
    }
}

/// Convert a date-time to its Excel 1900-system serial number (integer
/// part is the date, fractional part is the time of day).
pub fn datetime_to_serial(dt: NaiveDateTime) -> f64 {
    let date_part = date_to_serial(dt.date());
    let secs_in_day = dt.time().num_seconds_from_midnight() as f64 + dt.time().nanosecond() as f64 / 1e9;
    date_part + secs_in_day / 86_400.0
}
