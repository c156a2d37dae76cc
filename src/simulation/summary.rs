//! Trajectory summary statistics.
//!
//! Reduces a weekly trajectory to the scalar figures shown alongside it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | GPA mean / min / max | Over all weekly predicted GPAs |
//! | Burnout risk | Terminal probability against the risk bands |
//! | Overload weeks | Weeks with cognitive load above the overload threshold |
//! | Sleep deficit | Σ max(0, baseline − weekly sleep), over the whole run |
//! | Required study | Σ declared workload − mean weekly study, floored at 0 |

use crate::config::{ModelConfig, SummaryConfig};
use crate::error::{Result, TwinError};
use crate::models::{BurnoutRisk, SimulationSummary, WeeklySnapshot};

/// Classifies a burnout probability.
pub fn classify_risk(probability: f64, config: &SummaryConfig) -> BurnoutRisk {
    if probability >= config.high_risk_threshold {
        BurnoutRisk::High
    } else if probability >= config.medium_risk_threshold {
        BurnoutRisk::Medium
    } else {
        BurnoutRisk::Low
    }
}

/// Reduces trajectories to [`SimulationSummary`] values.
#[derive(Debug, Clone, Copy)]
pub struct SummaryAggregator<'a> {
    config: &'a ModelConfig,
}

impl<'a> SummaryAggregator<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        Self { config }
    }

    /// Summarizes a trajectory.
    ///
    /// # Arguments
    /// * `snapshots` - Weekly snapshots, ordered by week.
    /// * `total_workload_hours` - Σ declared weekly workload of the run's courses.
    ///
    /// # Errors
    /// `TwinError::Computation` for an empty trajectory.
    pub fn summarize(
        &self,
        snapshots: &[WeeklySnapshot],
        total_workload_hours: f64,
    ) -> Result<SimulationSummary> {
        let last = snapshots
            .last()
            .ok_or_else(|| TwinError::computation("cannot summarize an empty trajectory"))?;
        let weeks = snapshots.len() as f64;

        let mut gpa_min = f64::INFINITY;
        let mut gpa_max = f64::NEG_INFINITY;
        let mut gpa_total = 0.0;
        let mut load_total = 0.0;
        let mut study_total = 0.0;
        let mut sleep_deficit = 0.0;
        let baseline = self.config.baseline_weekly_sleep();

        for snap in snapshots {
            gpa_min = gpa_min.min(snap.predicted_gpa);
            gpa_max = gpa_max.max(snap.predicted_gpa);
            gpa_total += snap.predicted_gpa;
            load_total += snap.cognitive_load;
            study_total += snap.time_allocation.study_hours();
            sleep_deficit += (baseline - snap.time_allocation.sleep_hours).max(0.0);
        }

        let peak_overload_weeks: Vec<u32> = snapshots
            .iter()
            .filter(|s| s.cognitive_load > self.config.load.overload_threshold)
            .map(|s| s.week)
            .collect();

        let burnout_probability = last.burnout_probability;
        let burnout_risk = classify_risk(burnout_probability, &self.config.summary);
        let recommendation = self.recommend(
            burnout_risk,
            &peak_overload_weeks,
            load_total / weeks,
            sleep_deficit,
            snapshots.len(),
        );

        Ok(SimulationSummary {
            predicted_gpa_min: gpa_min,
            predicted_gpa_max: gpa_max,
            predicted_gpa_mean: gpa_total / weeks,
            burnout_risk,
            burnout_probability,
            peak_overload_weeks,
            required_study_hours_per_week: (total_workload_hours - study_total / weeks).max(0.0),
            sleep_deficit_hours: sleep_deficit,
            recommendation,
        })
    }

    /// Picks the recommendation text.
    ///
    /// Sentences are appended in order: risk, sleep, overload, then a
    /// sustainability note for light low-risk schedules. An empty result
    /// falls back to the balanced message.
    ///
    /// `sleep_deficit_hours` is the run's cumulative shortfall, as
    /// reported in the summary. The sleep sentence fires when its weekly
    /// average over `weeks` exceeds `sleep_alert_hours_per_week`.
    pub fn recommend(
        &self,
        risk: BurnoutRisk,
        overload_weeks: &[u32],
        mean_load: f64,
        sleep_deficit_hours: f64,
        weeks: usize,
    ) -> String {
        let cfg = &self.config.summary;
        let mut parts: Vec<String> = Vec::new();
        let weekly_sleep_deficit = sleep_deficit_hours / weeks.max(1) as f64;

        match risk {
            BurnoutRisk::High => parts.push(
                "Burnout risk is high. Consider dropping one course or reducing work hours.".into(),
            ),
            BurnoutRisk::Medium if overload_weeks.is_empty() => parts.push(
                "Moderate burnout risk detected. Build more recovery time into the week.".into(),
            ),
            BurnoutRisk::Medium => {
                let watch: Vec<String> = overload_weeks.iter().take(3).map(u32::to_string).collect();
                parts.push(format!(
                    "Moderate burnout risk detected. Watch weeks {}.",
                    watch.join(", ")
                ));
            }
            BurnoutRisk::Low => {}
        }

        if weekly_sleep_deficit > cfg.sleep_alert_hours_per_week {
            parts.push(format!(
                "Sleep deficit of {sleep_deficit_hours:.0}h over {weeks} weeks ({weekly_sleep_deficit:.1}h/week). Prioritize sleep to protect cognitive performance."
            ));
        }

        if overload_weeks.len() >= cfg.overload_alert_weeks {
            parts.push(
                "Cognitive load is repeatedly above the overload line. Switch to spaced study and increase recovery time."
                    .into(),
            );
        } else if risk == BurnoutRisk::Low && mean_load < cfg.light_load_threshold {
            parts.push(
                "Schedule appears sustainable. Consider adding a course or research commitment.".into(),
            );
        }

        if parts.is_empty() {
            return "Schedule is well-balanced. Maintain current workload and study strategy.".into();
        }
        parts.join(" ")
    }
}
