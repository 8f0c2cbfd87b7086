//! Compiler configuration.

use crate::error::{Error, Result};
use crate::time::{Day, TimeGrid, TimeUnit};

/// Global bounds shared by every student in a batch.
///
/// # Examples
///
/// ```
/// use u_timeblock::compile::CompilerConfig;
/// use u_timeblock::time::TimeGrid;
///
/// let config = CompilerConfig::default()
///     .with_grid(TimeGrid::default().with_bounds(1, 32))
///     .with_slots(1, 2)
///     .with_min_block_length(2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CompilerConfig {
    /// Quantization grid and schedulable bounds.
    pub grid: TimeGrid,

    /// Minimum number of assigned blocks per student.
    pub min_slots: usize,

    /// Maximum number of assigned blocks per student. Also the number
    /// of decision variables created per student.
    pub max_slots: usize,

    /// Minimum length of an assigned block, in units.
    pub min_block_length: TimeUnit,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            grid: TimeGrid::default(),
            min_slots: 2,
            max_slots: 3,
            min_block_length: 4,
        }
    }
}

impl CompilerConfig {
    pub fn with_grid(mut self, grid: TimeGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the slot count range `[min, max]`.
    pub fn with_slots(mut self, min: usize, max: usize) -> Self {
        self.min_slots = min;
        self.max_slots = max;
        self
    }

    pub fn with_min_block_length(mut self, units: TimeUnit) -> Self {
        self.min_block_length = units;
        self
    }

    /// Largest total a single student can request.
    pub fn max_required_units(&self) -> TimeUnit {
        self.max_slots as TimeUnit * self.grid.span()
    }

    /// Validates the global bounds.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        if self.min_slots == 0 {
            return Err(Error::config("min_slots must be at least 1"));
        }
        if self.min_slots > self.max_slots {
            return Err(Error::config(format!(
                "min_slots ({}) exceeds max_slots ({})",
                self.min_slots, self.max_slots
            )));
        }
        // blocks sit on pairwise distinct weekdays
        if self.max_slots > Day::COUNT {
            return Err(Error::config(format!(
                "max_slots ({}) exceeds the {} available days",
                self.max_slots,
                Day::COUNT
            )));
        }
        if self.min_block_length < 1 || self.min_block_length > self.grid.span() {
            return Err(Error::config(format!(
                "min_block_length must lie in [1, {}], got {}",
                self.grid.span(),
                self.min_block_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert_eq!(config.grid, TimeGrid::default());
        assert_eq!(config.min_slots, 2);
        assert_eq!(config.max_slots, 3);
        assert_eq!(config.min_block_length, 4);
        assert_eq!(config.max_required_units(), 3 * 39);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_slot_range() {
        assert!(CompilerConfig::default().with_slots(0, 2).validate().is_err());
        assert!(CompilerConfig::default().with_slots(3, 2).validate().is_err());
        assert!(CompilerConfig::default().with_slots(1, 6).validate().is_err());
        assert!(CompilerConfig::default().with_slots(5, 5).validate().is_ok());
    }

    #[test]
    fn test_invalid_min_block_length() {
        assert!(CompilerConfig::default()
            .with_min_block_length(0)
            .validate()
            .is_err());
        assert!(CompilerConfig::default()
            .with_min_block_length(40)
            .validate()
            .is_err());
        assert!(CompilerConfig::default()
            .with_min_block_length(39)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_invalid_grid_propagates() {
        let config = CompilerConfig::default().with_grid(TimeGrid::default().with_bounds(5, 5));
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
