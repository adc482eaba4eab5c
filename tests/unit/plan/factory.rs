use super::*;

fn span(a: i64, b: i64) -> TimeSpan {
    TimeSpan::bounded(Timestamp(a), Timestamp(b)).unwrap()
}

#[test]
fn skipped_steps_are_dropped_not_shifted() {
    let plan = AnimationPlanFactory::create_default_plan(
        span(0, 100),
        Duration::millis(25),
        &[span(25, 50)],
    )
    .unwrap();
    assert_eq!(plan.sequence(), &[span(0, 25), span(50, 75), span(75, 100)]);
    assert_eq!(plan.end_behavior(), EndBehavior::Wrap);
}

#[test]
fn partial_overlap_drops_the_whole_step() {
    let plan = AnimationPlanFactory::create_default_plan(
        span(0, 100),
        Duration::millis(25),
        &[span(40, 60)],
    )
    .unwrap();
    assert_eq!(plan.sequence(), &[span(0, 25), span(75, 100)]);
}

#[test]
fn last_step_may_run_past_the_loop_end() {
    let plan =
        AnimationPlanFactory::create_default_plan(span(0, 100), Duration::millis(30), &[])
            .unwrap();
    assert_eq!(
        plan.sequence(),
        &[span(0, 30), span(30, 60), span(60, 90), span(90, 120)]
    );
}

#[test]
fn calendar_frames_follow_month_lengths() {
    const DAY_MS: i64 = 86_400_000;
    let loop_span = span(0, 90 * DAY_MS);
    let plan =
        AnimationPlanFactory::create_default_plan(loop_span, Duration::months(1), &[]).unwrap();
    let lengths: Vec<_> = plan
        .sequence()
        .iter()
        .map(|s| s.duration_millis().unwrap() / DAY_MS)
        .collect();
    // January, February, March 1970.
    assert_eq!(lengths, vec![31, 28, 31]);
}

#[test]
fn default_plan_rejects_bad_inputs() {
    assert!(matches!(
        AnimationPlanFactory::create_default_plan(
            TimeSpan::starting_at(Timestamp(0)),
            Duration::millis(10),
            &[],
        ),
        Err(PlanError::InvalidArgument(_))
    ));
    assert!(
        AnimationPlanFactory::create_default_plan(span(0, 10), Duration::ZERO, &[]).is_err()
    );
}

#[test]
fn empty_loop_yields_empty_plan() {
    let plan =
        AnimationPlanFactory::create_default_plan(span(5, 5), Duration::millis(10), &[]).unwrap();
    assert!(plan.is_empty());
}

#[test]
fn continuous_plan_subtracts_skips_and_drops_short_pieces() {
    let plan = AnimationPlanFactory::create_continuous_plan(
        span(0, 100),
        span(0, 100),
        Duration::millis(10),
        Duration::millis(5),
        &[span(20, 30), span(60, 95)],
    )
    .unwrap();
    assert_eq!(plan.discrete().sequence(), &[span(0, 20), span(30, 60)]);
    assert_eq!(plan.limit_window(), span(0, 100));
    assert_eq!(plan.get_advance_duration(), Duration::millis(5));
    assert_eq!(plan.discrete().end_behavior(), EndBehavior::Wrap);
}

#[test]
fn continuous_plan_keeps_pieces_exactly_one_window_long() {
    let plan = AnimationPlanFactory::create_continuous_plan(
        TimeSpan::timeless(),
        span(0, 50),
        Duration::millis(10),
        Duration::millis(10),
        &[span(10, 40)],
    )
    .unwrap();
    assert_eq!(plan.discrete().sequence(), &[span(0, 10), span(40, 50)]);
    assert!(plan.limit_window().is_timeless());
}

#[test]
fn continuous_plan_requires_bounded_sequence_span() {
    let err = AnimationPlanFactory::create_continuous_plan(
        span(0, 10),
        TimeSpan::ending_at(Timestamp(10)),
        Duration::millis(1),
        Duration::millis(1),
        &[],
    )
    .unwrap_err();
    assert!(matches!(err, PlanError::InvalidArgument(_)));
}
