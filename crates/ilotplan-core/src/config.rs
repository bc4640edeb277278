//! Per-request engine configuration.
//!
//! The engine is a stateless value: every optimization request builds an
//! [`EngineConfig`] (or takes the defaults), and nothing is shared
//! between requests. Budget profiles bound every strategy so no run can
//! go unbounded.

use serde::{Deserialize, Serialize};

/// Lower clamp for the corridor width, in meters.
pub const CORRIDOR_WIDTH_MIN: f64 = 0.8;
/// Upper clamp for the corridor width, in meters.
pub const CORRIDOR_WIDTH_MAX: f64 = 3.0;

/// Requested island coverage of the usable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageProfile {
    Low,
    Medium,
    High,
    Maximum,
}

impl CoverageProfile {
    /// Target fraction of the usable area occupied by islands.
    pub fn fraction(self) -> f64 {
        match self {
            CoverageProfile::Low => 0.10,
            CoverageProfile::Medium => 0.25,
            CoverageProfile::High => 0.30,
            CoverageProfile::Maximum => 0.35,
        }
    }

    /// Map an upstream keyword onto a profile.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "low" => Some(CoverageProfile::Low),
            "medium" => Some(CoverageProfile::Medium),
            "high" => Some(CoverageProfile::High),
            "maximum" => Some(CoverageProfile::Maximum),
            _ => None,
        }
    }
}

/// Hard iteration budgets for the bounded strategies.
///
/// The original system shipped near-duplicate "fast" and "full" engines
/// that differed only in these numbers; here they are one engine with
/// two profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetProfile {
    /// Uniform position samples per island for the randomized strategy.
    pub random_attempts: u32,
    /// Evolutionary population size.
    pub population: usize,
    /// Evolutionary generation count.
    pub generations: u32,
    /// Force-relaxation iteration count.
    pub relax_iterations: u32,
}

impl BudgetProfile {
    /// Production budgets.
    pub fn full() -> Self {
        Self {
            random_attempts: 1000,
            population: 50,
            generations: 100,
            relax_iterations: 100,
        }
    }

    /// Reduced budgets for previews and tests.
    pub fn fast() -> Self {
        Self {
            random_attempts: 200,
            population: 16,
            generations: 25,
            relax_iterations: 40,
        }
    }
}

impl Default for BudgetProfile {
    fn default() -> Self {
        Self::full()
    }
}

/// All tunables for one optimization request. Distances in meters,
/// areas in m².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Corridor width; clamped to [`CORRIDOR_WIDTH_MIN`, `CORRIDOR_WIDTH_MAX`].
    pub corridor_width: f64,
    /// Half of the required free gap between islands: two islands each
    /// buffered by this amount must not touch.
    pub min_island_spacing: f64,
    /// Inter-island gap below which the accessibility score is penalized.
    pub min_clearance: f64,
    /// Required distance between any island and an entrance.
    pub entrance_clearance: f64,
    /// Usable-area fragments below this area are discarded.
    pub min_fragment_area: f64,
    /// Center-y tolerance for grouping islands into a row.
    pub row_tolerance: f64,
    /// Minimum vertical separation for two rows to count as facing.
    pub min_row_separation: f64,
    /// Maximum island-center distance considered for MST corridors.
    pub max_connection_distance: f64,
    /// Entrance distance beyond which a zone is considered poorly served.
    pub max_travel_distance: f64,
    /// Island-island overlap area tolerated before a compliance warning.
    pub overlap_tolerance: f64,
    /// Seed for every random source in the request.
    pub seed: u64,
    /// Per-strategy iteration budgets.
    pub budget: BudgetProfile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corridor_width: 1.2,
            min_island_spacing: 0.5,
            min_clearance: 1.5,
            entrance_clearance: 2.0,
            min_fragment_area: 4.0,
            row_tolerance: 2.0,
            min_row_separation: 2.0,
            max_connection_distance: 15.0,
            max_travel_distance: 30.0,
            overlap_tolerance: 0.1,
            seed: 0,
            budget: BudgetProfile::default(),
        }
    }
}

impl EngineConfig {
    /// Clamp a requested corridor width into the supported range.
    /// Non-finite requests fall back to the lower bound.
    pub fn clamp_corridor_width(width: f64) -> f64 {
        if !width.is_finite() {
            return CORRIDOR_WIDTH_MIN;
        }
        width.clamp(CORRIDOR_WIDTH_MIN, CORRIDOR_WIDTH_MAX)
    }

    /// Return a copy with the corridor width clamped into range.
    pub fn with_corridor_width(mut self, width: f64) -> Self {
        self.corridor_width = Self::clamp_corridor_width(width);
        self
    }

    /// Return a copy with a different seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Corridor width outside the supported range.
    CorridorWidthOutOfRange(f64),
    /// A distance tunable is non-finite or negative.
    InvalidDistance(&'static str, f64),
    /// A budget field is zero.
    EmptyBudget(&'static str),
}

/// Validate a configuration, returning all problems found.
pub fn validate_config(config: &EngineConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !config.corridor_width.is_finite()
        || config.corridor_width < CORRIDOR_WIDTH_MIN
        || config.corridor_width > CORRIDOR_WIDTH_MAX
    {
        errors.push(ConfigError::CorridorWidthOutOfRange(config.corridor_width));
    }

    let distances = [
        ("min_island_spacing", config.min_island_spacing),
        ("min_clearance", config.min_clearance),
        ("entrance_clearance", config.entrance_clearance),
        ("min_fragment_area", config.min_fragment_area),
        ("row_tolerance", config.row_tolerance),
        ("min_row_separation", config.min_row_separation),
        ("max_connection_distance", config.max_connection_distance),
        ("max_travel_distance", config.max_travel_distance),
        ("overlap_tolerance", config.overlap_tolerance),
    ];
    for (name, value) in distances {
        if !value.is_finite() || value < 0.0 {
            errors.push(ConfigError::InvalidDistance(name, value));
        }
    }

    if config.budget.random_attempts == 0 {
        errors.push(ConfigError::EmptyBudget("random_attempts"));
    }
    if config.budget.population == 0 {
        errors.push(ConfigError::EmptyBudget("population"));
    }
    if config.budget.generations == 0 {
        errors.push(ConfigError::EmptyBudget("generations"));
    }
    if config.budget.relax_iterations == 0 {
        errors.push(ConfigError::EmptyBudget("relax_iterations"));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        let errors = validate_config(&config);
        assert!(errors.is_empty(), "default config should be valid: {errors:?}");
    }

    #[test]
    fn coverage_profile_fractions() {
        assert!((CoverageProfile::Low.fraction() - 0.10).abs() < 1e-12);
        assert!((CoverageProfile::Medium.fraction() - 0.25).abs() < 1e-12);
        assert!((CoverageProfile::High.fraction() - 0.30).abs() < 1e-12);
        assert!((CoverageProfile::Maximum.fraction() - 0.35).abs() < 1e-12);
    }

    #[test]
    fn coverage_profile_keywords() {
        assert_eq!(
            CoverageProfile::from_keyword("medium"),
            Some(CoverageProfile::Medium)
        );
        assert_eq!(CoverageProfile::from_keyword("extreme"), None);
    }

    #[test]
    fn corridor_width_clamped_both_ways() {
        assert!((EngineConfig::clamp_corridor_width(5.0) - CORRIDOR_WIDTH_MAX).abs() < 1e-12);
        assert!((EngineConfig::clamp_corridor_width(0.1) - CORRIDOR_WIDTH_MIN).abs() < 1e-12);
        assert!((EngineConfig::clamp_corridor_width(1.2) - 1.2).abs() < 1e-12);
        assert!((EngineConfig::clamp_corridor_width(f64::NAN) - CORRIDOR_WIDTH_MIN).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_corridor_width_flagged() {
        let mut config = EngineConfig::default();
        config.corridor_width = 5.0;
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::CorridorWidthOutOfRange(5.0)));
    }

    #[test]
    fn zero_budget_flagged() {
        let mut config = EngineConfig::default();
        config.budget.generations = 0;
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::EmptyBudget("generations")));
    }

    #[test]
    fn fast_budget_smaller_than_full() {
        let fast = BudgetProfile::fast();
        let full = BudgetProfile::full();
        assert!(fast.random_attempts < full.random_attempts);
        assert!(fast.population < full.population);
        assert!(fast.generations < full.generations);
        assert!(fast.relax_iterations < full.relax_iterations);
    }
}
