//! Model coefficients.
//!
//! Every tunable constant of the weekly model lives in [`ModelConfig`].
//! Each section deserializes with defaults, so a TOML file only needs
//! the values it overrides:
//!
//! ```
//! use u_academic_twin::config::ModelConfig;
//!
//! let config = ModelConfig::from_toml_str(
//!     r#"
//!     [load]
//!     exam_multiplier = 1.5
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.load.exam_multiplier, 1.5);
//! assert_eq!(config.load.overload_threshold, 70.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::StudyStrategy;

/// One coefficient per study strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyCoefficients {
    pub spaced: f64,
    pub mixed: f64,
    pub cramming: f64,
}

impl StrategyCoefficients {
    pub const fn new(spaced: f64, mixed: f64, cramming: f64) -> Self {
        Self {
            spaced,
            mixed,
            cramming,
        }
    }

    /// Coefficient for the given strategy.
    #[inline]
    pub fn get(&self, strategy: StudyStrategy) -> f64 {
        match strategy {
            StudyStrategy::Spaced => self.spaced,
            StudyStrategy::Mixed => self.mixed,
            StudyStrategy::Cramming => self.cramming,
        }
    }

    pub(crate) fn values(&self) -> [f64; 3] {
        [self.spaced, self.mixed, self.cramming]
    }
}

/// Complete model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Nightly sleep baseline (hours). Deficit and surplus are measured against it.
    pub baseline_sleep_hours: f64,
    pub time: TimeBudgetConfig,
    pub course_load: CourseLoadConfig,
    pub load: LoadConfig,
    pub fatigue: FatigueConfig,
    pub retention: RetentionConfig,
    pub grades: GradeConfig,
    pub burnout: BurnoutConfig,
    pub summary: SummaryConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            baseline_sleep_hours: 7.0,
            time: TimeBudgetConfig::default(),
            course_load: CourseLoadConfig::default(),
            load: LoadConfig::default(),
            fatigue: FatigueConfig::default(),
            retention: RetentionConfig::default(),
            grades: GradeConfig::default(),
            burnout: BurnoutConfig::default(),
            summary: SummaryConfig::default(),
        }
    }
}

impl ModelConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Weekly sleep baseline (hours per week).
    #[inline]
    pub fn baseline_weekly_sleep(&self) -> f64 {
        self.baseline_sleep_hours * 7.0
    }
}

/// Weekly time budget split.
///
/// Social time, meals and errands take whatever the study and recovery
/// shares leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeBudgetConfig {
    /// Share of the flexible hours spent studying.
    pub study_share: f64,
    /// Share of the flexible hours reserved for recovery.
    pub recovery_share: f64,
    /// Deep fraction of study hours per strategy.
    pub deep_ratio: StrategyCoefficients,
    /// Recovery multiplier during exam weeks. Freed hours become deep study.
    pub exam_recovery_factor: f64,
    /// Cramming study-share multiplier when the next exam is far away.
    pub cramming_idle_factor: f64,
    /// Cramming study-share multiplier inside the burst window.
    pub cramming_burst_factor: f64,
    /// Weeks before an exam (inclusive) that count as the burst window.
    pub cramming_burst_window: u32,
}

impl Default for TimeBudgetConfig {
    fn default() -> Self {
        Self {
            study_share: 0.35,
            recovery_share: 0.25,
            deep_ratio: StrategyCoefficients::new(0.70, 0.50, 0.30),
            exam_recovery_factor: 0.5,
            cramming_idle_factor: 0.75,
            cramming_burst_factor: 1.5,
            cramming_burst_window: 1,
        }
    }
}

/// Per-course demand derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseLoadConfig {
    /// Difficulty at which a workload hour counts as one demand hour.
    pub reference_difficulty: f64,
    /// Credit count at which a workload hour counts as one demand hour.
    pub reference_credits: f64,
    /// Lower bound on demand hours.
    pub min_demand_hours: f64,
    /// Courses with at least this many credits carry a lab/recitation hour.
    pub lab_credit_threshold: u32,
    pub lab_hours: f64,
}

impl Default for CourseLoadConfig {
    fn default() -> Self {
        Self {
            reference_difficulty: 5.0,
            reference_credits: 3.0,
            min_demand_hours: 0.5,
            lab_credit_threshold: 4,
            lab_hours: 1.0,
        }
    }
}

/// Cognitive load coefficients (load points per hour unless noted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub class_weight: f64,
    pub work_weight: f64,
    /// Applied to difficulty-scaled study hours.
    pub study_weight: f64,
    /// Raw load is multiplied by `1 + fatigue_amplification * prior_fatigue`.
    pub fatigue_amplification: f64,
    pub recovery_relief: f64,
    /// Relief per weekly sleep hour above baseline.
    pub sleep_surplus_relief: f64,
    /// Penalty per weekly sleep hour below baseline.
    pub sleep_deficit_penalty: f64,
    /// Difficulty above which a course counts as hard.
    pub hard_course_difficulty: f64,
    /// Load added per simultaneous hard course beyond the first.
    pub hard_course_penalty: f64,
    pub exam_multiplier: f64,
    /// Load above which a week counts as overloaded.
    pub overload_threshold: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            class_weight: 0.6,
            work_weight: 0.8,
            study_weight: 0.6,
            fatigue_amplification: 0.3,
            recovery_relief: 0.3,
            sleep_surplus_relief: 0.5,
            sleep_deficit_penalty: 1.5,
            hard_course_difficulty: 7.0,
            hard_course_penalty: 5.0,
            exam_multiplier: 1.3,
            overload_threshold: 70.0,
        }
    }
}

/// Fatigue recurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueConfig {
    pub decay: f64,
    pub growth: f64,
    /// Fatigue removed per nightly sleep hour above baseline.
    pub sleep_relief: f64,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            decay: 0.6,
            growth: 0.4,
            sleep_relief: 0.05,
        }
    }
}

/// Forgetting curve and learning gain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Retention at the start of term.
    pub initial_retention: f64,
    /// Memory stability (days) per strategy.
    pub stability_days: StrategyCoefficients,
    /// Days between reviews within one simulated week.
    pub review_interval_days: f64,
    /// Ceiling of a single week's learning gain.
    pub max_weekly_gain: f64,
    /// Curvature of the logarithmic gain curve.
    pub gain_curvature: f64,
    /// Gain multiplier per strategy.
    pub learning_efficiency: StrategyCoefficients,
    /// Weight of a shallow study hour relative to a deep one.
    pub shallow_study_weight: f64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            initial_retention: 1.0,
            stability_days: StrategyCoefficients::new(21.0, 10.0, 4.0),
            review_interval_days: 7.0,
            max_weekly_gain: 0.6,
            gain_curvature: 4.0,
            learning_efficiency: StrategyCoefficients::new(1.25, 1.0, 0.8),
            shallow_study_weight: 0.5,
        }
    }
}

/// Grade trajectory.
///
/// The weekly target is a logistic curve over the study-to-demand ratio,
/// plus a retention bonus weighted by the assessment mix, minus an
/// overload penalty. Grades move toward it by a bounded step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradeConfig {
    /// Grade every course starts the term at.
    pub initial_grade: f64,
    /// Target with no study at all.
    pub base_floor: f64,
    /// Height of the study curve above the floor.
    pub base_span: f64,
    /// Study-to-demand ratio at the curve's midpoint.
    pub ratio_midpoint: f64,
    pub ratio_steepness: f64,
    /// Points added at full retention with unit assessment weight.
    pub retention_points: f64,
    /// Exam-component weight multiplier during exam weeks.
    pub exam_emphasis: f64,
    /// Points lost per load point above the overload threshold.
    pub load_penalty: f64,
    /// Largest weekly grade movement (points).
    pub max_weekly_step: f64,
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self {
            initial_grade: 75.0,
            base_floor: 40.0,
            base_span: 55.0,
            ratio_midpoint: 1.0,
            ratio_steepness: 2.5,
            retention_points: 10.0,
            exam_emphasis: 1.5,
            load_penalty: 0.5,
            max_weekly_step: 8.0,
        }
    }
}

/// Burnout logistic model and hysteresis bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurnoutConfig {
    /// Fraction of accumulated strain kept each week.
    pub strain_persistence: f64,
    pub strain_weight: f64,
    pub load_weight: f64,
    pub sleep_weight: f64,
    /// Load at which the load factor starts rising.
    pub load_band_start: f64,
    /// Weekly sleep deficit (hours) at which the sleep factor saturates.
    pub sleep_deficit_saturation: f64,
    pub midpoint: f64,
    pub steepness: f64,
    /// Fraction of the gap to a higher target closed each week.
    pub rise_rate: f64,
    /// Fatigue must be below this for the probability to fall.
    pub recovery_fatigue_threshold: f64,
    /// Load must be below this for the probability to fall.
    pub recovery_load_threshold: f64,
    /// Largest weekly decrease.
    pub max_recovery_step: f64,
}

impl Default for BurnoutConfig {
    fn default() -> Self {
        Self {
            strain_persistence: 0.8,
            strain_weight: 0.5,
            load_weight: 0.3,
            sleep_weight: 0.2,
            load_band_start: 50.0,
            sleep_deficit_saturation: 21.0,
            midpoint: 0.45,
            steepness: 10.0,
            rise_rate: 0.6,
            recovery_fatigue_threshold: 0.4,
            recovery_load_threshold: 55.0,
            max_recovery_step: 0.05,
        }
    }
}

/// Risk classification and recommendation triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub high_risk_threshold: f64,
    pub medium_risk_threshold: f64,
    /// Cumulative sleep deficit divided by the number of weeks (hours)
    /// above which the recommendation warns about sleep.
    pub sleep_alert_hours_per_week: f64,
    /// Overloaded weeks that trigger a study-strategy warning.
    pub overload_alert_weeks: usize,
    /// Mean load under which a LOW-risk schedule counts as light.
    pub light_load_threshold: f64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            high_risk_threshold: 0.6,
            medium_risk_threshold: 0.3,
            sleep_alert_hours_per_week: 7.0,
            overload_alert_weeks: 3,
            light_load_threshold: 40.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = ModelConfig::default();
        let t = &config.time;
        assert!(t.study_share + t.recovery_share < 1.0);
        assert!(config.summary.medium_risk_threshold < config.summary.high_risk_threshold);
        assert!(config.burnout.recovery_load_threshold < config.load.overload_threshold);
        assert!((config.baseline_weekly_sleep() - 49.0).abs() < 1e-10);
    }

    #[test]
    fn test_strategy_lookup() {
        let c = StrategyCoefficients::new(1.0, 2.0, 3.0);
        assert_eq!(c.get(StudyStrategy::Spaced), 1.0);
        assert_eq!(c.get(StudyStrategy::Mixed), 2.0);
        assert_eq!(c.get(StudyStrategy::Cramming), 3.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ModelConfig::from_toml_str(
            r#"
            baseline_sleep_hours = 8.0

            [burnout]
            max_recovery_step = 0.02

            [retention.stability_days]
            spaced = 30.0
            mixed = 12.0
            cramming = 3.0
            "#,
        )
        .unwrap();

        assert_eq!(config.baseline_sleep_hours, 8.0);
        assert_eq!(config.burnout.max_recovery_step, 0.02);
        assert_eq!(config.burnout.midpoint, 0.45);
        assert_eq!(config.retention.stability_days.spaced, 30.0);
        assert_eq!(config.load, LoadConfig::default());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = ModelConfig::from_toml_str("[load]\nexam_multiplier = \"high\"").unwrap_err();
        assert!(matches!(err, crate::error::TwinError::Config(_)));
    }
}
