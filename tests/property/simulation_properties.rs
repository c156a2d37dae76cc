use proptest::prelude::*;
use u_academic_twin::ModelConfig;
use u_academic_twin::models::{Course, ScenarioConfig, SimulationResult, Student, StudyStrategy};
use u_academic_twin::simulation::{HOURS_PER_WEEK, SimulationRunner, grade_points};

fn arb_strategy() -> impl Strategy<Value = StudyStrategy> {
    prop_oneof![
        Just(StudyStrategy::Spaced),
        Just(StudyStrategy::Mixed),
        Just(StudyStrategy::Cramming),
    ]
}

fn arb_courses() -> impl Strategy<Value = Vec<Course>> {
    prop::collection::vec((1u32..=5, 1.0f64..=10.0, 0.0f64..=25.0), 1..=6).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (credits, difficulty, workload))| {
                Course::new(i as u64 + 1, format!("Course {}", i + 1))
                    .with_credits(credits)
                    .with_difficulty(difficulty)
                    .with_workload(workload)
            })
            .collect()
    })
}

fn arb_scenario(course_count: usize) -> impl Strategy<Value = ScenarioConfig> {
    (
        4u32..=20,
        0.0f64..=80.0,
        4.0f64..=12.0,
        arb_strategy(),
        prop::collection::vec(1u32..=20, 0..3),
    )
        .prop_map(move |(weeks, work, sleep, strategy, exams)| {
            ScenarioConfig::new(1)
                .with_num_weeks(weeks)
                .with_work_hours(work)
                .with_sleep_target(sleep)
                .with_strategy(strategy)
                .with_courses(1..=course_count as u64)
                .with_exam_weeks(exams.into_iter().filter(|w| *w <= weeks).collect::<Vec<_>>())
        })
}

fn arb_case() -> impl Strategy<Value = (Vec<Course>, ScenarioConfig)> {
    arb_courses().prop_flat_map(|courses| {
        let n = courses.len();
        (Just(courses), arb_scenario(n))
    })
}

fn simulate(scenario: &ScenarioConfig, courses: &[Course]) -> SimulationResult {
    let config = ModelConfig::default();
    SimulationRunner::new(&config)
        .run(scenario, &Student::new(1), courses)
        .unwrap()
}

// ── Time budget always covers exactly one week ─────────────────────────

proptest! {
    #[test]
    fn allocation_sums_to_one_week((courses, scenario) in arb_case()) {
        let result = simulate(&scenario, &courses);
        for snapshot in &result.weekly_snapshots {
            let a = &snapshot.time_allocation;
            prop_assert!((a.category_sum() - HOURS_PER_WEEK).abs() < 1e-6, "week {} sums to {}", snapshot.week, a.category_sum());
            prop_assert!((a.total_hours - a.category_sum()).abs() < 1e-9);
            prop_assert!(a.study_hours() >= 0.0 && a.recovery_hours >= 0.0 && a.social_hours >= 0.0);
        }
    }
}

// ── State variables stay inside their ranges ───────────────────────────

proptest! {
    #[test]
    fn state_stays_bounded((courses, scenario) in arb_case()) {
        let result = simulate(&scenario, &courses);
        prop_assert_eq!(result.weekly_snapshots.len(), scenario.num_weeks as usize);
        for s in &result.weekly_snapshots {
            prop_assert!((0.0..=100.0).contains(&s.cognitive_load));
            prop_assert!((0.0..=1.0).contains(&s.fatigue_level));
            prop_assert!((0.0..=1.0).contains(&s.burnout_probability));
            prop_assert!((0.0..=1.0).contains(&s.retention_score));
            prop_assert!((0.0..=4.0).contains(&s.predicted_gpa));
            for grade in s.course_grades.values() {
                prop_assert!((0.0..=100.0).contains(grade));
            }
        }
        let summary = &result.summary;
        prop_assert!(summary.predicted_gpa_min <= summary.predicted_gpa_mean + 1e-12);
        prop_assert!(summary.predicted_gpa_mean <= summary.predicted_gpa_max + 1e-12);
    }
}

// ── Same inputs, same trajectory ───────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn simulation_is_deterministic((courses, scenario) in arb_case()) {
        let a = simulate(&scenario, &courses);
        let b = simulate(&scenario, &courses);
        prop_assert_eq!(a.weekly_snapshots, b.weekly_snapshots);
        prop_assert_eq!(a.summary, b.summary);
    }
}

// ── Burnout recovers slowly and only when rested ───────────────────────

proptest! {
    #[test]
    fn burnout_recovery_is_gated_and_bounded((courses, scenario) in arb_case()) {
        let config = ModelConfig::default();
        let cfg = &config.burnout;
        let result = simulate(&scenario, &courses);
        for pair in result.weekly_snapshots.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            if cur.burnout_probability < prev.burnout_probability {
                prop_assert!(prev.burnout_probability - cur.burnout_probability <= cfg.max_recovery_step + 1e-12);
                prop_assert!(cur.fatigue_level < cfg.recovery_fatigue_threshold);
                prop_assert!(cur.cognitive_load < cfg.recovery_load_threshold);
            }
        }
    }
}

// ── Grade points never fall as the percentage rises ────────────────────

proptest! {
    #[test]
    fn grade_points_monotone(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(grade_points(lo) <= grade_points(hi));
    }
}

// ── Target GPA is an aspiration, not an input to the model ─────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn target_gpa_does_not_move_predictions(
        (courses, scenario) in arb_case(),
        target in 0.0f64..=4.0,
    ) {
        let config = ModelConfig::default();
        let runner = SimulationRunner::new(&config);
        let neutral = simulate(&scenario, &courses);
        let aspiring = runner
            .run(&scenario, &Student::new(1).with_target_gpa(target), &courses)
            .unwrap();
        prop_assert_eq!(neutral.summary, aspiring.summary);
    }
}

// ── Spacing beats cramming for retention ───────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn spaced_retains_more_than_cramming(
        courses in arb_courses(),
        work in 0.0f64..=20.0,
        sleep in 7.0f64..=9.0,
    ) {
        let n = courses.len() as u64;
        let base = ScenarioConfig::new(1)
            .with_work_hours(work)
            .with_sleep_target(sleep)
            .with_courses(1..=n)
            .with_exam_weeks([8, 16]);
        let mean_retention = |strategy| {
            let result = simulate(&base.clone().with_strategy(strategy), &courses);
            result.weekly_snapshots.iter().map(|s| s.retention_score).sum::<f64>()
                / result.weekly_snapshots.len() as f64
        };
        prop_assert!(mean_retention(StudyStrategy::Spaced) > mean_retention(StudyStrategy::Cramming));
    }
}
