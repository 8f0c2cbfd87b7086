//! Planner configuration.

use crate::compile::CompilerConfig;
use crate::cp::SolverConfig;
use crate::error::{Error, Result};

/// How a batch is handed to the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SolveMode {
    /// One system holding every student.
    #[default]
    Joint,
    /// One independent system per student.
    PerStudent,
}

/// Configuration of a [`Planner`](super::Planner).
///
/// # Examples
///
/// ```
/// use u_timeblock::cp::SolverConfig;
/// use u_timeblock::planner::{PlannerConfig, SolveMode};
///
/// let config = PlannerConfig::default()
///     .with_mode(SolveMode::PerStudent)
///     .with_parallel(true)
///     .with_solver(SolverConfig::default().with_time_limit_ms(5_000));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PlannerConfig {
    /// Global bounds for compilation and verification.
    pub compiler: CompilerConfig,

    /// Backend settings, applied to every solve.
    pub solver: SolverConfig,

    /// Joint or per-student solving.
    pub mode: SolveMode,

    /// Whether per-student solves run on the rayon pool.
    ///
    /// Ignored without the `parallel` feature.
    pub parallel: bool,

    /// Whether an infeasible joint solve is followed by one solve per
    /// student to name the students that cannot be scheduled.
    pub localize_infeasibility: bool,
}

impl PlannerConfig {
    pub fn with_compiler(mut self, compiler: CompilerConfig) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_mode(mut self, mode: SolveMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_localize_infeasibility(mut self, localize: bool) -> Self {
        self.localize_infeasibility = localize;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.compiler.validate()?;
        if self.solver.num_workers == 0 {
            return Err(Error::config("solver.num_workers must be at least 1"));
        }
        Ok(())
    }

    /// Parses and validates a TOML configuration.
    ///
    /// Missing keys take their default values.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML configuration file.
    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.mode, SolveMode::Joint);
        assert!(!config.parallel);
        assert!(!config.localize_infeasibility);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_workers() {
        let config =
            PlannerConfig::default().with_solver(SolverConfig::default().with_num_workers(0));
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_compiler_config() {
        let config =
            PlannerConfig::default().with_compiler(CompilerConfig::default().with_slots(3, 1));
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_toml() {
        let config = PlannerConfig::from_toml_str(
            r#"
            mode = "per_student"
            localize_infeasibility = true

            [compiler]
            min_slots = 1
            max_slots = 2

            [compiler.grid]
            last_unit = 32

            [solver]
            time_limit_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.mode, SolveMode::PerStudent);
        assert!(config.localize_infeasibility);
        assert!(!config.parallel);
        assert_eq!(config.compiler.min_slots, 1);
        assert_eq!(config.compiler.max_slots, 2);
        assert_eq!(config.compiler.min_block_length, 4);
        assert_eq!(config.compiler.grid.last_unit, 32);
        assert_eq!(config.compiler.grid.start_hour, 9);
        assert_eq!(config.solver.time_limit_ms, 1500);
        assert_eq!(config.solver.num_workers, 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(matches!(
            PlannerConfig::from_toml_str("mode = \"sideways\""),
            Err(Error::Toml(_))
        ));
        assert!(matches!(
            PlannerConfig::from_toml_str("[compiler]\nmin_block_length = 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            PlannerConfig::from_toml_str("[compiler.grid]\nlast_unit = 9223372036854775807"),
            Err(Error::Config(_))
        ));
    }
}
