//! Quantization of the working day into discrete time units.

use crate::error::{Error, Result};

/// An instant on the quantization grid.
///
/// Unit `u` names the wall-clock instant
/// `start_hour:00 + (u - 1) * minutes_per_unit`.
pub type TimeUnit = i64;

/// Quantization grid of a working day.
///
/// The default grid covers 9:00 to 19:00 in 15-minute steps, i.e.
/// units `1..=40` where unit 1 is 9:00 and unit 40 is 18:45.
///
/// # Examples
///
/// ```
/// use u_timeblock::time::TimeGrid;
///
/// let grid = TimeGrid::default();
/// assert_eq!(grid.quantize(9, 0), Some(1));
/// assert_eq!(grid.quantize(10, 15), Some(6));
/// assert_eq!(grid.dequantize(6), (10, 15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TimeGrid {
    /// Wall-clock hour of unit 1.
    pub start_hour: u32,
    /// Minutes per unit. Must divide 60.
    pub minutes_per_unit: u32,
    /// Smallest schedulable unit.
    pub first_unit: TimeUnit,
    /// Largest schedulable unit.
    pub last_unit: TimeUnit,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            start_hour: 9,
            minutes_per_unit: 15,
            first_unit: 1,
            last_unit: 40,
        }
    }
}

impl TimeGrid {
    pub fn with_start_hour(mut self, hour: u32) -> Self {
        self.start_hour = hour;
        self
    }

    pub fn with_minutes_per_unit(mut self, minutes: u32) -> Self {
        self.minutes_per_unit = minutes;
        self
    }

    /// Sets the schedulable unit bounds (inclusive).
    pub fn with_bounds(mut self, first: TimeUnit, last: TimeUnit) -> Self {
        self.first_unit = first;
        self.last_unit = last;
        self
    }

    /// Validates the grid.
    pub fn validate(&self) -> Result<()> {
        if self.minutes_per_unit == 0 || 60 % self.minutes_per_unit != 0 {
            return Err(Error::config(format!(
                "minutes_per_unit must divide 60, got {}",
                self.minutes_per_unit
            )));
        }
        if self.start_hour >= 24 {
            return Err(Error::config(format!(
                "start_hour must be below 24, got {}",
                self.start_hour
            )));
        }
        if self.first_unit < 1 {
            return Err(Error::config(format!(
                "first_unit must be at least 1, got {}",
                self.first_unit
            )));
        }
        if self.first_unit >= self.last_unit {
            return Err(Error::config(format!(
                "first_unit ({}) must be less than last_unit ({})",
                self.first_unit, self.last_unit
            )));
        }
        let last_minute = self.minute_of_day(self.last_unit);
        if !matches!(last_minute, Some(m) if m < 24 * 60) {
            return Err(Error::config(format!(
                "last_unit {} falls past midnight",
                self.last_unit
            )));
        }
        Ok(())
    }

    /// Units per wall-clock hour.
    #[inline]
    pub fn units_per_hour(&self) -> TimeUnit {
        TimeUnit::from(60 / self.minutes_per_unit)
    }

    /// Longest possible block, `last_unit - first_unit`.
    #[inline]
    pub fn span(&self) -> TimeUnit {
        self.last_unit - self.first_unit
    }

    /// Whether `unit` lies within `[first_unit, last_unit]`.
    #[inline]
    pub fn contains(&self, unit: TimeUnit) -> bool {
        (self.first_unit..=self.last_unit).contains(&unit)
    }

    /// Converts a whole number of hours into units, `None` on overflow.
    pub fn units_for_hours(&self, hours: i64) -> Option<TimeUnit> {
        hours.checked_mul(self.units_per_hour())
    }

    /// Converts a wall-clock time into a unit.
    ///
    /// Returns `None` for times off the grid (minute not a multiple of
    /// the granularity) or outside the schedulable bounds.
    pub fn quantize(&self, hour: u32, minute: u32) -> Option<TimeUnit> {
        if hour < self.start_hour || minute >= 60 || minute % self.minutes_per_unit != 0 {
            return None;
        }
        let unit = TimeUnit::from(hour - self.start_hour) * self.units_per_hour()
            + TimeUnit::from(minute / self.minutes_per_unit)
            + 1;
        self.contains(unit).then_some(unit)
    }

    /// Converts a unit back into `(hour, minute)`.
    ///
    /// Exact inverse of [`quantize`](Self::quantize) for every unit it produces.
    pub fn dequantize(&self, unit: TimeUnit) -> (u32, u32) {
        let minutes = self.minute_of_day(unit).unwrap_or(0).max(0);
        ((minutes / 60) as u32, (minutes % 60) as u32)
    }

    fn minute_of_day(&self, unit: TimeUnit) -> Option<i64> {
        unit.checked_sub(1)?
            .checked_mul(i64::from(self.minutes_per_unit))?
            .checked_add(i64::from(self.start_hour) * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_grid() {
        let grid = TimeGrid::default();
        assert!(grid.validate().is_ok());
        assert_eq!(grid.units_per_hour(), 4);
        assert_eq!(grid.span(), 39);
        assert_eq!(grid.units_for_hours(4), Some(16));
        assert_eq!(grid.units_for_hours(i64::MAX), None);
    }

    #[test]
    fn test_literal_units() {
        let grid = TimeGrid::default();
        assert_eq!(grid.dequantize(1), (9, 0));
        assert_eq!(grid.dequantize(5), (10, 0));
        assert_eq!(grid.dequantize(40), (18, 45));
        assert_eq!(grid.quantize(9, 0), Some(1));
        assert_eq!(grid.quantize(10, 0), Some(5));
    }

    #[test]
    fn test_quantize_rejects_off_grid() {
        let grid = TimeGrid::default();
        assert_eq!(grid.quantize(9, 10), None);
        assert_eq!(grid.quantize(8, 45), None);
        assert_eq!(grid.quantize(19, 0), None);
        assert_eq!(grid.quantize(9, 60), None);
    }

    #[test]
    fn test_validate_bad_granularity() {
        let grid = TimeGrid::default().with_minutes_per_unit(7);
        assert!(grid.validate().is_err());
        let grid = TimeGrid::default().with_minutes_per_unit(0);
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_validate_bad_bounds() {
        assert!(TimeGrid::default().with_bounds(0, 40).validate().is_err());
        assert!(TimeGrid::default().with_bounds(10, 10).validate().is_err());
        assert!(TimeGrid::default()
            .with_start_hour(20)
            .with_bounds(1, 40)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_huge_last_unit() {
        let grid = TimeGrid::default().with_bounds(1, i64::MAX);
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_half_hour_grid() {
        let grid = TimeGrid::default()
            .with_start_hour(8)
            .with_minutes_per_unit(30)
            .with_bounds(1, 20);
        assert!(grid.validate().is_ok());
        assert_eq!(grid.quantize(8, 30), Some(2));
        assert_eq!(grid.dequantize(3), (9, 0));
    }

    proptest! {
        #[test]
        fn prop_roundtrip(hour in 9u32..19, quarter in 0u32..4) {
            let grid = TimeGrid::default();
            let minute = quarter * 15;
            let unit = grid.quantize(hour, minute);
            prop_assert!(unit.is_some());
            prop_assert_eq!(grid.dequantize(unit.unwrap()), (hour, minute));
        }

        #[test]
        fn prop_quantize_is_monotone(a in 1i64..=40, b in 1i64..=40) {
            let grid = TimeGrid::default();
            let (ha, ma) = grid.dequantize(a);
            let (hb, mb) = grid.dequantize(b);
            prop_assert_eq!(a < b, (ha, ma) < (hb, mb));
        }
    }
}
