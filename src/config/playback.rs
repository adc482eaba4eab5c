use crate::{
    foundation::{error::PlanResult, span::TimeSpan, time::Timestamp},
    plan::{
        dispatch::Plan,
        state::{Direction, PlanState},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Caller-side playback options. Plans never read these.
pub struct PlaybackConfig {
    /// Advisory: the caller should coalesce update requests with its own processing timer.
    pub use_processing_timeout: bool,
    /// Direction a fresh cursor starts in.
    pub direction: Direction,
}

/// A plan plus the caller's current position in it.
///
/// The cursor owns the only mutable state; the plan is never modified. Once a STOP plan runs
/// out the cursor is finished (`state()` is `None`) until [`Playback::restart`] or
/// [`Playback::seek`] re-seeds it.
#[derive(Clone, Debug)]
pub struct Playback {
    plan: Plan,
    state: Option<PlanState>,
    config: PlaybackConfig,
}

impl Playback {
    /// Create a cursor seeded at the start of `plan` (or at its end for backward playback).
    pub fn new(plan: Plan, config: PlaybackConfig) -> PlanResult<Self> {
        let state = seed(&plan, config.direction)?;
        Ok(Self {
            plan,
            state,
            config,
        })
    }

    /// The plan being played.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Current state, `None` for an empty plan or a finished cursor.
    pub fn state(&self) -> Option<PlanState> {
        self.state
    }

    /// Return `true` when there is no current state.
    pub fn is_finished(&self) -> bool {
        self.state.is_none()
    }

    /// Span to show for the current state.
    pub fn time_span(&self) -> PlanResult<Option<TimeSpan>> {
        self.state
            .map(|s| self.plan.get_time_span_for_state(s))
            .transpose()
    }

    /// Advance one state; `false` when the cursor is (or just became) finished.
    pub fn step_forward(&mut self) -> PlanResult<bool> {
        let Some(state) = self.state else {
            return Ok(false);
        };
        self.state = self.plan.determine_next_state(state)?;
        Ok(self.state.is_some())
    }

    /// Go back one state; `false` when the cursor is (or just became) finished.
    pub fn step_backward(&mut self) -> PlanResult<bool> {
        let Some(state) = self.state else {
            return Ok(false);
        };
        self.state = self.plan.determine_previous_state(state)?;
        Ok(self.state.is_some())
    }

    /// Flip the direction of travel in place.
    pub fn reverse(&mut self) {
        self.state = self.state.map(PlanState::reverse);
    }

    /// Jump to the state for `t`, keeping the current direction; `false` for an empty plan.
    pub fn seek(&mut self, t: Timestamp) -> PlanResult<bool> {
        let direction = self
            .state
            .map_or(self.config.direction, |s| s.direction());
        self.state = self.plan.find_state_at(t, direction)?;
        Ok(self.state.is_some())
    }

    /// Re-seed the cursor as [`Playback::new`] does.
    pub fn restart(&mut self) -> PlanResult<()> {
        self.state = seed(&self.plan, self.config.direction)?;
        Ok(())
    }

    /// Playback options.
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Mutable playback options; a new direction applies on the next [`Playback::restart`].
    pub fn config_mut(&mut self) -> &mut PlaybackConfig {
        &mut self.config
    }
}

fn seed(plan: &Plan, direction: Direction) -> PlanResult<Option<PlanState>> {
    let Some(initial) = plan.get_initial_state()? else {
        return Ok(None);
    };
    Ok(match direction {
        Direction::Forward => Some(initial),
        Direction::Backward => plan.get_final_state(initial)?.map(PlanState::reverse),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/config/playback.rs"]
mod tests;
