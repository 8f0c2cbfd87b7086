//! Weekdays.

use std::fmt;
use std::str::FromStr;

/// A working day. Ordered Monday < ... < Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// All days in week order.
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Number of working days.
    pub const COUNT: usize = 5;

    /// Zero-based index (Monday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day for a zero-based index, if in range.
    pub fn from_index(index: usize) -> Option<Day> {
        Self::ALL.get(index).copied()
    }

    /// English name of the day.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no working day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day: {0}")]
pub struct ParseDayError(pub String);

impl FromStr for Day {
    type Err = ParseDayError;

    /// Accepts full names and three-letter abbreviations, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| {
                let name = day.name().to_ascii_lowercase();
                name == needle || name[..3] == needle
            })
            .ok_or_else(|| ParseDayError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for (i, day) in Day::ALL.into_iter().enumerate() {
            assert_eq!(day.index(), i);
            assert_eq!(Day::from_index(i), Some(day));
        }
        assert_eq!(Day::from_index(5), None);
    }

    #[test]
    fn test_total_order() {
        assert!(Day::Monday < Day::Tuesday);
        assert!(Day::Thursday < Day::Friday);
        assert_eq!(Day::ALL.iter().max(), Some(&Day::Friday));
    }

    #[test]
    fn test_parse() {
        assert_eq!("thursday".parse::<Day>(), Ok(Day::Thursday));
        assert_eq!(" Mon ".parse::<Day>(), Ok(Day::Monday));
        assert_eq!("FRI".parse::<Day>(), Ok(Day::Friday));
        assert!("saturday".parse::<Day>().is_err());
        assert!("".parse::<Day>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Day::Wednesday.to_string(), "Wednesday");
    }
}
