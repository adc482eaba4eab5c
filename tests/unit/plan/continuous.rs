use super::*;

use Direction::{Backward as B, Forward as F};

fn span(a: i64, b: i64) -> TimeSpan {
    TimeSpan::bounded(Timestamp(a), Timestamp(b)).unwrap()
}

fn ms(v: i64) -> Duration {
    Duration::millis(v)
}

fn cst(step: usize, direction: Direction, a: i64, b: i64) -> ContinuousAnimationState {
    ContinuousAnimationState::new(step, direction, span(a, b))
}

/// Two 30ms steps, 10ms window sliding by 10ms.
fn two_steps(end_behavior: EndBehavior) -> ContinuousAnimationPlan {
    ContinuousAnimationPlan::new(
        vec![span(0, 30), span(30, 60)],
        ms(10),
        ms(10),
        end_behavior,
        None,
    )
    .unwrap()
}

/// Three 30ms steps clamped to [40, 70).
fn limited_three() -> ContinuousAnimationPlan {
    ContinuousAnimationPlan::new(
        vec![span(0, 30), span(30, 60), span(60, 90)],
        ms(10),
        ms(10),
        EndBehavior::Wrap,
        Some(span(40, 70)),
    )
    .unwrap()
}

#[test]
fn window_slides_inside_a_single_parent_span() {
    let plan = ContinuousAnimationPlan::new(
        vec![span(0, 100)],
        ms(10),
        ms(10),
        EndBehavior::Wrap,
        Some(span(0, 100)),
    )
    .unwrap();

    let mut state = cst(0, F, 0, 10);
    let mut windows = Vec::new();
    for _ in 0..5 {
        state = plan.determine_next_state(state).unwrap().unwrap();
        assert_eq!(state.step_number(), 0);
        windows.push(state.active_time_span);
    }
    assert_eq!(
        windows,
        vec![span(10, 20), span(20, 30), span(30, 40), span(40, 50), span(50, 60)]
    );
}

#[test]
fn single_span_wrap_reanchors_at_the_start() {
    let plan =
        ContinuousAnimationPlan::new(vec![span(0, 30)], ms(10), ms(10), EndBehavior::Wrap, None)
            .unwrap();
    let next = plan.determine_next_state(cst(0, F, 20, 30)).unwrap();
    assert_eq!(next, Some(cst(0, F, 0, 10)));
}

#[test]
fn rolls_over_into_the_next_parent_step() {
    let plan = two_steps(EndBehavior::Wrap);
    let next = plan.determine_next_state(cst(0, F, 20, 30)).unwrap();
    assert_eq!(next, Some(cst(1, F, 30, 40)));

    let wrapped = plan.determine_next_state(cst(1, F, 50, 60)).unwrap();
    assert_eq!(wrapped, Some(cst(0, F, 0, 10)));
}

#[test]
fn backward_travel_anchors_at_the_end_of_the_parent() {
    let plan = two_steps(EndBehavior::Wrap);
    assert_eq!(
        plan.determine_next_state(cst(1, B, 40, 50)).unwrap(),
        Some(cst(1, B, 30, 40))
    );
    assert_eq!(
        plan.determine_next_state(cst(1, B, 30, 40)).unwrap(),
        Some(cst(0, B, 20, 30))
    );
}

#[test]
fn previous_is_the_mirror_of_next() {
    let plan = two_steps(EndBehavior::Wrap);
    assert_eq!(
        plan.determine_previous_state(cst(1, F, 40, 50)).unwrap(),
        Some(cst(1, F, 30, 40))
    );
    assert_eq!(
        plan.determine_previous_state(cst(1, F, 30, 40)).unwrap(),
        Some(cst(0, F, 20, 30))
    );
    assert_eq!(
        plan.determine_previous_state(cst(0, F, 0, 10)).unwrap(),
        Some(cst(1, F, 50, 60))
    );
}

#[test]
fn bounce_reverses_without_skipping_the_boundary_step() {
    let plan = two_steps(EndBehavior::Bounce);
    let bounced = plan.determine_next_state(cst(1, F, 50, 60)).unwrap().unwrap();
    assert_eq!(bounced, cst(1, B, 50, 60));

    let after = plan.determine_next_state(bounced).unwrap().unwrap();
    assert_eq!(after, cst(1, B, 40, 50));

    let low = plan.determine_next_state(cst(0, B, 0, 10)).unwrap().unwrap();
    assert_eq!(low, cst(0, F, 0, 10));
}

#[test]
fn stop_ends_playback() {
    let plan = two_steps(EndBehavior::Stop);
    assert_eq!(plan.determine_next_state(cst(1, F, 50, 60)).unwrap(), None);
    assert_eq!(plan.determine_previous_state(cst(0, F, 0, 10)).unwrap(), None);
    assert_eq!(
        plan.determine_next_state(cst(0, F, 20, 30)).unwrap(),
        Some(cst(1, F, 30, 40))
    );
}

#[test]
fn limit_window_restricts_sub_stepping() {
    let plan = limited_three();
    let mut state = plan.get_initial_state().unwrap().unwrap();
    assert_eq!(state, cst(1, F, 40, 50));

    let mut seen = vec![state.active_time_span];
    for _ in 0..3 {
        state = plan.determine_next_state(state).unwrap().unwrap();
        seen.push(state.active_time_span);
    }
    assert_eq!(
        seen,
        vec![span(40, 50), span(50, 60), span(60, 70), span(40, 50)]
    );
    assert_eq!(state.step_number(), 1);
}

#[test]
fn drifted_window_is_reset_to_the_limit_edge() {
    let plan = limited_three();
    assert_eq!(
        plan.determine_next_state(cst(1, F, 30, 40)).unwrap(),
        Some(cst(1, F, 40, 50))
    );
    assert_eq!(
        plan.determine_next_state(cst(2, B, 75, 85)).unwrap(),
        Some(cst(2, B, 60, 70))
    );
}

#[test]
fn invalid_states_are_rejected() {
    let plan = limited_three();
    // Window straddles two parent spans.
    assert!(matches!(
        plan.determine_next_state(cst(0, F, 25, 35)),
        Err(PlanError::InvalidArgument(_))
    ));
    // Parent step entirely outside the limit window.
    assert!(matches!(
        plan.determine_next_state(cst(0, F, 0, 10)),
        Err(PlanError::InvalidArgument(_))
    ));
    assert!(matches!(
        plan.get_time_span_for_state(cst(3, F, 0, 10)),
        Err(PlanError::InvalidIndex { index: 3, len: 3 })
    ));
}

#[test]
fn construction_validates_inputs() {
    let open = ContinuousAnimationPlan::new(
        vec![span(0, 10), TimeSpan::starting_at(Timestamp(10))],
        ms(5),
        ms(5),
        EndBehavior::Wrap,
        None,
    );
    assert!(matches!(open, Err(PlanError::InvalidArgument(_))));

    let zero_advance =
        ContinuousAnimationPlan::new(vec![span(0, 10)], ms(5), ms(0), EndBehavior::Wrap, None);
    assert!(zero_advance.is_err());

    let zero_window =
        ContinuousAnimationPlan::new(vec![span(0, 10)], ms(-1), ms(5), EndBehavior::Wrap, None);
    assert!(zero_window.is_err());

    let plan = two_steps(EndBehavior::Wrap);
    assert!(plan.limit_window().is_timeless());
    assert_eq!(plan.get_limit_window(), span(0, 60));
    assert_eq!(limited_three().get_limit_window(), span(40, 70));
    assert_eq!(plan.get_advance_duration(), ms(10));
    assert_eq!(plan.active_window_duration(), ms(10));
}

#[test]
fn final_state_is_computed_in_closed_form() {
    let plan = two_steps(EndBehavior::Wrap);
    assert_eq!(
        plan.get_final_state(cst(0, F, 0, 10)).unwrap(),
        Some(cst(1, F, 50, 60))
    );
    assert_eq!(
        plan.get_final_state(cst(1, B, 30, 40)).unwrap(),
        Some(cst(0, B, 0, 10))
    );

    // 7ms sub-steps from [0,10) stop at [84,94): the next one would leave [0,100).
    let uneven =
        ContinuousAnimationPlan::new(vec![span(0, 100)], ms(10), ms(7), EndBehavior::Wrap, None)
            .unwrap();
    assert_eq!(
        uneven.get_final_state(cst(0, F, 0, 10)).unwrap(),
        Some(cst(0, F, 84, 94))
    );

    assert_eq!(
        limited_three().get_final_state(cst(1, F, 40, 50)).unwrap(),
        Some(cst(2, F, 60, 70))
    );
}

#[test]
fn final_state_matches_stepping_to_the_end() {
    let plan =
        ContinuousAnimationPlan::new(vec![span(0, 100)], ms(10), ms(7), EndBehavior::Stop, None)
            .unwrap();
    let mut state = cst(0, F, 0, 10);
    while let Some(next) = plan.determine_next_state(state).unwrap() {
        state = next;
    }
    assert_eq!(plan.get_final_state(cst(0, F, 0, 10)).unwrap(), Some(state));
}

#[test]
fn final_state_rejects_calendar_advance() {
    let plan = ContinuousAnimationPlan::new(
        vec![span(0, 100)],
        ms(10),
        Duration::months(1),
        EndBehavior::Wrap,
        None,
    )
    .unwrap();
    assert!(matches!(
        plan.get_final_state(cst(0, F, 0, 10)),
        Err(PlanError::Unsupported(_))
    ));
}

#[test]
fn find_state_anchors_and_clamps_the_window() {
    let plan = two_steps(EndBehavior::Wrap);
    assert_eq!(
        plan.find_state_at(Timestamp(45), F).unwrap(),
        Some(cst(1, F, 45, 55))
    );
    assert_eq!(
        plan.find_state_at(Timestamp(55), F).unwrap(),
        Some(cst(1, F, 50, 60))
    );
    assert_eq!(
        plan.find_state_at(Timestamp(5), B).unwrap(),
        Some(cst(0, B, 0, 10))
    );
    assert_eq!(
        plan.find_state_for_span(span(33, 35), B).unwrap(),
        Some(cst(1, B, 30, 40))
    );
    assert_eq!(
        plan.find_state_for_span(span(12, 14), F).unwrap(),
        Some(cst(0, F, 12, 22))
    );
}

#[test]
fn find_state_respects_the_limit_window() {
    let plan = limited_three();
    assert_eq!(
        plan.find_state_at(Timestamp(35), F).unwrap(),
        Some(cst(1, F, 40, 50))
    );
}

#[test]
fn backward_find_past_the_limit_anchors_at_its_end() {
    let plan = ContinuousAnimationPlan::new(
        vec![span(0, 200)],
        ms(10),
        ms(10),
        EndBehavior::Wrap,
        Some(span(45, 130)),
    )
    .unwrap();
    for t in [130, 500] {
        assert_eq!(
            plan.find_state_at(Timestamp(t), B).unwrap(),
            Some(cst(0, B, 120, 130))
        );
    }
    assert_eq!(
        plan.find_state_at(Timestamp(500), F).unwrap(),
        Some(cst(0, F, 120, 130))
    );
    assert_eq!(
        plan.find_state_at(Timestamp(100), B).unwrap(),
        Some(cst(0, B, 90, 100))
    );
}

#[test]
fn found_states_are_valid_for_stepping() {
    let plan = limited_three();
    for t in [0, 15, 35, 45, 59, 65, 89, 200] {
        for dir in [F, B] {
            let state = plan.find_state_at(Timestamp(t), dir).unwrap().unwrap();
            let span = plan.get_time_span_for_state(state).unwrap();
            assert_eq!(span, state.active_time_span);
        }
    }
}

#[test]
fn empty_continuous_plan() {
    let plan =
        ContinuousAnimationPlan::new(vec![], ms(10), ms(10), EndBehavior::Wrap, None).unwrap();
    let s = cst(0, F, 0, 10);
    assert_eq!(plan.get_initial_state().unwrap(), None);
    assert_eq!(plan.determine_next_state(s).unwrap(), None);
    assert_eq!(plan.get_final_state(s).unwrap(), None);
    assert_eq!(plan.get_time_span_for_state(s).unwrap(), TimeSpan::zero());
    assert_eq!(plan.find_state_at(Timestamp(3), F).unwrap(), None);
}

#[test]
fn delegated_sequence_and_distance() {
    let plan = two_steps(EndBehavior::Wrap);
    assert_eq!(
        plan.get_animation_sequence(cst(1, F, 30, 40), 3, F).unwrap(),
        vec![span(30, 60), span(0, 30), span(30, 60)]
    );
    assert_eq!(
        plan.calculate_distance(cst(1, F, 30, 40), cst(0, F, 0, 10)).unwrap(),
        1
    );
}
