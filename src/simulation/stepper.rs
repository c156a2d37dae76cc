//! Week-to-week state transition.
//!
//! The carried state is an explicit value: [`WeeklyStateStepper::step`]
//! consumes week *t* and returns week *t+1*. Within a step the updates run
//! in a fixed order, each reading the values produced before it:
//!
//! 1. Cognitive load from the week's allocation and prior fatigue
//! 2. Fatigue by exponential smoothing of load
//! 3. Per-course retention (forgetting curve plus learning gain)
//! 4. Per-course grade toward a target set by study hours against
//!    demand, retention and overload, bounded step
//! 5. Burnout probability from a logistic score, with hysteresis
//! 6. Predicted GPA from the week's grades
//!
//! # Reference
//! Ebbinghaus (1885), "Über das Gedächtnis"; retention decays as
//! `exp(-t / S)` with memory stability `S`.

use crate::config::ModelConfig;
use crate::error::{Result, TwinError};
use crate::models::{StudyStrategy, TimeAllocation, WeeklySnapshot};

use super::course_load::CourseDemand;

/// Letter-grade breakpoints: (minimum percentage, grade points).
pub const GRADE_SCALE: [(f64, f64); 11] = [
    (93.0, 4.0),
    (90.0, 3.7),
    (87.0, 3.3),
    (83.0, 3.0),
    (80.0, 2.7),
    (77.0, 2.3),
    (73.0, 2.0),
    (70.0, 1.7),
    (67.0, 1.3),
    (63.0, 1.0),
    (60.0, 0.7),
];

/// Grade points for a percentage.
pub fn grade_points(percent: f64) -> f64 {
    GRADE_SCALE
        .iter()
        .find(|(cutoff, _)| percent >= *cutoff)
        .map_or(0.0, |(_, points)| *points)
}

/// State carried between weeks.
///
/// `retention` and `grades` are indexed like the run's course list.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekState {
    /// Last completed week (0 before the first step).
    pub week: u32,
    pub cognitive_load: f64,
    pub fatigue: f64,
    /// Slow-moving average of fatigue feeding the burnout score.
    pub strain: f64,
    pub burnout_probability: f64,
    pub retention: Vec<f64>,
    /// Percentages, 0.0..=100.0.
    pub grades: Vec<f64>,
    pub predicted_gpa: f64,
}

impl WeekState {
    /// Term-start state: no load, fatigue or burnout; full retention;
    /// every grade at the configured neutral prior.
    ///
    /// A student's target GPA is an aspiration and never seeds the state.
    pub fn initial(config: &ModelConfig, courses: &[CourseDemand]) -> Self {
        let grade = config.grades.initial_grade;
        Self {
            week: 0,
            cognitive_load: 0.0,
            fatigue: 0.0,
            strain: 0.0,
            burnout_probability: 0.0,
            retention: vec![config.retention.initial_retention; courses.len()],
            grades: vec![grade; courses.len()],
            predicted_gpa: grade_points(grade),
        }
    }

    /// Mean retention across courses.
    pub fn mean_retention(&self) -> f64 {
        if self.retention.is_empty() {
            return 0.0;
        }
        self.retention.iter().sum::<f64>() / self.retention.len() as f64
    }
}

/// Applies one week of the model.
#[derive(Debug, Clone)]
pub struct WeeklyStateStepper<'a> {
    config: &'a ModelConfig,
    strategy: StudyStrategy,
    courses: Vec<CourseDemand>,
    total_credits: f64,
}

impl<'a> WeeklyStateStepper<'a> {
    pub fn new(config: &'a ModelConfig, strategy: StudyStrategy, courses: Vec<CourseDemand>) -> Self {
        let total_credits = courses.iter().map(|c| f64::from(c.credits)).sum();
        Self {
            config,
            strategy,
            courses,
            total_credits,
        }
    }

    pub fn courses(&self) -> &[CourseDemand] {
        &self.courses
    }

    /// Advances `state` by one week under `allocation`.
    ///
    /// # Errors
    /// `TwinError::Computation` if any state variable becomes non-finite.
    pub fn step(
        &self,
        state: WeekState,
        allocation: &TimeAllocation,
        exam_week: bool,
    ) -> Result<WeekState> {
        let WeekState {
            week,
            fatigue: prior_fatigue,
            strain,
            burnout_probability,
            mut retention,
            mut grades,
            ..
        } = state;

        let load = self.cognitive_load(allocation, prior_fatigue, exam_week);
        let fatigue = self.fatigue(prior_fatigue, load, allocation);

        let study = allocation.study_hours();
        for (i, course) in self.courses.iter().enumerate() {
            retention[i] = self.retention(retention[i], course, allocation);
            grades[i] = self.grade(grades[i], retention[i], course, study, load, exam_week);
        }

        let (strain, burnout_probability) =
            self.burnout(strain, burnout_probability, fatigue, load, allocation);
        let predicted_gpa = self.gpa(&grades);

        let next = WeekState {
            week: week + 1,
            cognitive_load: load,
            fatigue,
            strain,
            burnout_probability,
            retention,
            grades,
            predicted_gpa,
        };
        self.check_finite(&next)?;

        tracing::trace!(
            week = next.week,
            load = next.cognitive_load,
            fatigue = next.fatigue,
            burnout = next.burnout_probability,
            gpa = next.predicted_gpa,
            "week stepped"
        );
        Ok(next)
    }

    /// Builds the snapshot published for `state`.
    pub fn snapshot(
        &self,
        state: &WeekState,
        allocation: TimeAllocation,
        is_exam_week: bool,
    ) -> WeeklySnapshot {
        let names = self.courses.iter().map(|c| c.name.clone());
        WeeklySnapshot {
            week: state.week,
            cognitive_load: state.cognitive_load,
            predicted_gpa: state.predicted_gpa,
            burnout_probability: state.burnout_probability,
            fatigue_level: state.fatigue,
            retention_score: state.mean_retention(),
            time_allocation: allocation,
            course_grades: names.clone().zip(state.grades.iter().copied()).collect(),
            course_retentions: names.zip(state.retention.iter().copied()).collect(),
            is_exam_week,
        }
    }

    fn cognitive_load(&self, a: &TimeAllocation, prior_fatigue: f64, exam_week: bool) -> f64 {
        let cfg = &self.config.load;
        let reference = self.config.course_load.reference_difficulty;
        let study = a.study_hours();

        let study_load: f64 = self
            .courses
            .iter()
            .map(|c| study * c.share * c.difficulty / reference)
            .sum();
        let mut raw =
            cfg.class_weight * a.class_hours + cfg.work_weight * a.work_hours + cfg.study_weight * study_load;
        raw *= 1.0 + cfg.fatigue_amplification * prior_fatigue;
        if exam_week {
            raw *= cfg.exam_multiplier;
        }

        let baseline = self.config.baseline_weekly_sleep();
        let relief = cfg.recovery_relief * a.recovery_hours
            + cfg.sleep_surplus_relief * (a.sleep_hours - baseline).max(0.0)
            - cfg.sleep_deficit_penalty * (baseline - a.sleep_hours).max(0.0);

        let hard = self
            .courses
            .iter()
            .filter(|c| c.is_hard(cfg.hard_course_difficulty))
            .count();
        let sequencing = hard.saturating_sub(1) as f64 * cfg.hard_course_penalty;

        (raw - relief + sequencing + a.overcommitted_hours).clamp(0.0, 100.0)
    }

    fn fatigue(&self, prior: f64, load: f64, a: &TimeAllocation) -> f64 {
        let cfg = &self.config.fatigue;
        let sleep_relief = cfg.sleep_relief * (a.nightly_sleep() - self.config.baseline_sleep_hours);
        (prior * cfg.decay + load / 100.0 * cfg.growth - sleep_relief).clamp(0.0, 1.0)
    }

    fn retention(&self, prior: f64, course: &CourseDemand, a: &TimeAllocation) -> f64 {
        let cfg = &self.config.retention;
        let stability = cfg.stability_days.get(self.strategy) * (1.5 - course.difficulty / 10.0);
        let decayed = prior * (-cfg.review_interval_days / stability).exp();

        let effective = course.share * (a.deep_study_hours + cfg.shallow_study_weight * a.shallow_study_hours);
        let coverage = (effective / course.demand_hours).min(1.0);
        let gain = (cfg.max_weekly_gain * (cfg.gain_curvature * coverage).ln_1p()
            / cfg.gain_curvature.ln_1p()
            * cfg.learning_efficiency.get(self.strategy))
        .min(1.0);

        (decayed + gain * (1.0 - decayed)).clamp(0.0, 1.0)
    }

    /// Moves a grade toward this week's target.
    ///
    /// target = floor + span · σ(k · (study / demand − midpoint))
    ///        + points · retention · (assignment weight + exam weight)
    ///        − penalty · (load − overload threshold)⁺
    fn grade(
        &self,
        prior: f64,
        retention: f64,
        course: &CourseDemand,
        study: f64,
        load: f64,
        exam_week: bool,
    ) -> f64 {
        let cfg = &self.config.grades;
        let ratio = study * course.share / course.demand_hours;
        let base = cfg.base_floor
            + cfg.base_span / (1.0 + (-cfg.ratio_steepness * (ratio - cfg.ratio_midpoint)).exp());

        let mut exam_weight = course.sensitivity.exam();
        if exam_week {
            exam_weight *= cfg.exam_emphasis;
        }
        let bonus = cfg.retention_points * retention * (course.sensitivity.assignments + exam_weight);

        let overload = (load - self.config.load.overload_threshold).max(0.0);
        let target = (base + bonus - overload * cfg.load_penalty).clamp(0.0, 100.0);
        let delta = (target - prior).clamp(-cfg.max_weekly_step, cfg.max_weekly_step);
        (prior + delta).clamp(0.0, 100.0)
    }

    /// Returns the updated (strain, probability).
    ///
    /// The probability rises toward its logistic target quickly but falls
    /// only while both fatigue and load sit below the recovery thresholds,
    /// and then by at most `max_recovery_step` per week.
    fn burnout(
        &self,
        strain: f64,
        probability: f64,
        fatigue: f64,
        load: f64,
        a: &TimeAllocation,
    ) -> (f64, f64) {
        let cfg = &self.config.burnout;
        let strain = strain * cfg.strain_persistence + fatigue * (1.0 - cfg.strain_persistence);

        let load_excess = ((load - cfg.load_band_start) / (100.0 - cfg.load_band_start)).clamp(0.0, 1.0);
        let sleep_deficit =
            ((self.config.baseline_weekly_sleep() - a.sleep_hours) / cfg.sleep_deficit_saturation).clamp(0.0, 1.0);
        let score =
            cfg.strain_weight * strain + cfg.load_weight * load_excess + cfg.sleep_weight * sleep_deficit;
        let target = 1.0 / (1.0 + (-cfg.steepness * (score - cfg.midpoint)).exp());

        let next = if target >= probability {
            probability + (target - probability) * cfg.rise_rate
        } else if fatigue < cfg.recovery_fatigue_threshold && load < cfg.recovery_load_threshold {
            target.max(probability - cfg.max_recovery_step)
        } else {
            probability
        };
        (strain, next.clamp(0.0, 1.0))
    }

    fn gpa(&self, grades: &[f64]) -> f64 {
        if self.total_credits <= 0.0 {
            return 0.0;
        }
        let weighted: f64 = self
            .courses
            .iter()
            .zip(grades)
            .map(|(c, g)| grade_points(*g) * f64::from(c.credits))
            .sum();
        weighted / self.total_credits
    }

    fn check_finite(&self, s: &WeekState) -> Result<()> {
        let scalars = [
            ("cognitive_load", s.cognitive_load),
            ("fatigue", s.fatigue),
            ("strain", s.strain),
            ("burnout_probability", s.burnout_probability),
            ("predicted_gpa", s.predicted_gpa),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TwinError::computation(format!(
                "{name} became {value} in week {}",
                s.week
            )));
        }
        for (course, (r, g)) in self.courses.iter().zip(s.retention.iter().zip(&s.grades)) {
            if !r.is_finite() || !g.is_finite() {
                return Err(TwinError::computation(format!(
                    "state of course '{}' became non-finite in week {}",
                    course.name, s.week
                )));
            }
        }
        Ok(())
    }
}
