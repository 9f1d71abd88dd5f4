//! Date and time display utilities.

use std::fmt;

use jiff::{
    civil::{Date, DateTime},
    tz::TimeZone,
    Timestamp,
};

/// A wrapper around `Timestamp` that formats it in the system timezone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Time of day of a civil datetime as `HH:MM`.
pub struct ClockTime<'a>(pub &'a DateTime);

impl<'a> fmt::Display for ClockTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%H:%M"))
    }
}

/// A calendar date as `Sat 01 Jun 2024`.
pub struct LongDate<'a>(pub &'a Date);

impl<'a> fmt::Display for LongDate<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%a %d %b %Y"))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_civil_formats() {
        let at = date(2024, 6, 1).at(9, 5, 0, 0);
        assert_eq!(ClockTime(&at).to_string(), "09:05");
        assert_eq!(LongDate(&at.date()).to_string(), "Sat 01 Jun 2024");
    }
}
