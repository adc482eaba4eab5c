use crate::{
    foundation::{
        error::{PlanError, PlanResult},
        span::TimeSpan,
        time::{Duration, Timestamp},
    },
    plan::{
        continuous::ContinuousAnimationPlan,
        discrete::AnimationPlan,
        state::{ContinuousAnimationState, Direction, EndBehavior, PlanState},
    },
};

/// Either kind of plan, driven through [`PlanState`].
///
/// A discrete plan interprets a continuous state through its discrete part and answers with
/// discrete states. A continuous plan rejects discrete states with
/// [`PlanError::InvalidArgument`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Plan {
    /// Frame-snapped playback.
    Discrete(AnimationPlan),
    /// Sliding-window playback.
    Continuous(ContinuousAnimationPlan),
}

impl From<AnimationPlan> for Plan {
    fn from(plan: AnimationPlan) -> Self {
        Self::Discrete(plan)
    }
}

impl From<ContinuousAnimationPlan> for Plan {
    fn from(plan: ContinuousAnimationPlan) -> Self {
        Self::Continuous(plan)
    }
}

fn continuous_state(state: PlanState) -> PlanResult<ContinuousAnimationState> {
    match state {
        PlanState::Continuous(c) => Ok(c),
        PlanState::Discrete(s) => Err(PlanError::invalid_argument(format!(
            "continuous plans need a continuous state, got step {} without an active window",
            s.step_number
        ))),
    }
}

impl Plan {
    /// The discrete step sequence (the parent plan for continuous plans).
    pub fn discrete(&self) -> &AnimationPlan {
        match self {
            Self::Discrete(p) => p,
            Self::Continuous(p) => p.discrete(),
        }
    }

    /// Return `true` for continuous plans.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Continuous(_))
    }

    /// Policy applied at the ends of the sequence.
    pub fn end_behavior(&self) -> EndBehavior {
        self.discrete().end_behavior()
    }

    /// Return `true` when the plan has no steps.
    pub fn is_empty(&self) -> bool {
        self.discrete().is_empty()
    }

    /// Starting state, `None` when there is nothing to play.
    pub fn get_initial_state(&self) -> PlanResult<Option<PlanState>> {
        Ok(match self {
            Self::Discrete(p) => p.get_initial_state().map(PlanState::from),
            Self::Continuous(p) => p.get_initial_state()?.map(PlanState::from),
        })
    }

    /// Last state of the plan; continuous plans compute it relative to `state`'s direction.
    pub fn get_final_state(&self, state: PlanState) -> PlanResult<Option<PlanState>> {
        Ok(match self {
            Self::Discrete(p) => {
                p.check_state(state.discrete())?;
                p.get_final_state().map(PlanState::from)
            }
            Self::Continuous(p) => p
                .get_final_state(continuous_state(state)?)?
                .map(PlanState::from),
        })
    }

    /// Span to show for `state`: the step span, or the active window for continuous plans.
    pub fn get_time_span_for_state(&self, state: PlanState) -> PlanResult<TimeSpan> {
        match self {
            Self::Discrete(p) => p.get_time_span_for_state(state.discrete()),
            Self::Continuous(p) => p.get_time_span_for_state(continuous_state(state)?),
        }
    }

    /// Next state, `None` when a STOP plan runs out.
    pub fn determine_next_state(&self, state: PlanState) -> PlanResult<Option<PlanState>> {
        Ok(match self {
            Self::Discrete(p) => p.determine_next_state(state.discrete())?.map(PlanState::from),
            Self::Continuous(p) => p
                .determine_next_state(continuous_state(state)?)?
                .map(PlanState::from),
        })
    }

    /// Previous state, `None` when a STOP plan runs out.
    pub fn determine_previous_state(&self, state: PlanState) -> PlanResult<Option<PlanState>> {
        Ok(match self {
            Self::Discrete(p) => p
                .determine_previous_state(state.discrete())?
                .map(PlanState::from),
            Self::Continuous(p) => p
                .determine_previous_state(continuous_state(state)?)?
                .map(PlanState::from),
        })
    }

    /// Step distance from `from` to `to`; see [`AnimationPlan::calculate_distance`].
    pub fn calculate_distance(&self, from: PlanState, to: PlanState) -> PlanResult<i64> {
        match self {
            Self::Discrete(p) => p.calculate_distance(from.discrete(), to.discrete()),
            Self::Continuous(p) => {
                p.calculate_distance(continuous_state(from)?, continuous_state(to)?)
            }
        }
    }

    /// State for the instant `t`.
    pub fn find_state_at(
        &self,
        t: Timestamp,
        direction: Direction,
    ) -> PlanResult<Option<PlanState>> {
        Ok(match self {
            Self::Discrete(p) => p.find_state_at(t, direction).map(PlanState::from),
            Self::Continuous(p) => p.find_state_at(t, direction)?.map(PlanState::from),
        })
    }

    /// State best matching `span`.
    pub fn find_state_for_span(
        &self,
        span: TimeSpan,
        direction: Direction,
    ) -> PlanResult<Option<PlanState>> {
        Ok(match self {
            Self::Discrete(p) => p.find_state_for_span(span, direction).map(PlanState::from),
            Self::Continuous(p) => p.find_state_for_span(span, direction)?.map(PlanState::from),
        })
    }

    /// `count` step spans starting at `state`.
    pub fn get_animation_sequence(
        &self,
        state: PlanState,
        count: usize,
        direction: Direction,
    ) -> PlanResult<Vec<TimeSpan>> {
        match self {
            Self::Discrete(p) => p.get_animation_sequence(state.discrete(), count, direction),
            Self::Continuous(p) => {
                p.get_animation_sequence(continuous_state(state)?, count, direction)
            }
        }
    }

    /// Nominal distance between consecutive states.
    pub fn get_advance_duration(&self) -> Duration {
        match self {
            Self::Discrete(p) => p.get_advance_duration(),
            Self::Continuous(p) => p.get_advance_duration(),
        }
    }

    /// Bounds of playback.
    pub fn get_limit_window(&self) -> TimeSpan {
        match self {
            Self::Discrete(p) => p.get_limit_window(),
            Self::Continuous(p) => p.get_limit_window(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/dispatch.rs"]
mod tests;
