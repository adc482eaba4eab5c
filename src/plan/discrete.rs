use crate::{
    foundation::{
        error::{PlanError, PlanResult},
        span::TimeSpan,
        time::{Duration, Timestamp},
    },
    plan::state::{AnimationState, Direction, EndBehavior},
};

/// Distance reported when the target cannot be reached (STOP plans, empty plans).
pub const UNREACHABLE_DISTANCE: i64 = i64::MAX;

/// Ordered, immutable sequence of time spans and the rules for stepping through it.
///
/// Step numbers index the sequence; the sequence is chronological and may contain gaps.
/// Every operation that dereferences a state validates its step number first and fails with
/// [`PlanError::InvalidIndex`] instead of clamping. An empty plan is legal and has no states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationPlan {
    sequence: Vec<TimeSpan>,
    end_behavior: EndBehavior,
}

impl AnimationPlan {
    /// Create a plan over `sequence` (chronological order).
    pub fn new(sequence: Vec<TimeSpan>, end_behavior: EndBehavior) -> Self {
        Self {
            sequence,
            end_behavior,
        }
    }

    /// Same sequence under a different end behavior.
    pub fn with_end_behavior(self, end_behavior: EndBehavior) -> Self {
        Self {
            sequence: self.sequence,
            end_behavior,
        }
    }

    /// The animation sequence.
    pub fn sequence(&self) -> &[TimeSpan] {
        &self.sequence
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Return `true` when the plan has no steps.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Policy applied at the ends of the sequence.
    pub fn end_behavior(&self) -> EndBehavior {
        self.end_behavior
    }

    /// Shared bounds check for every operation that consumes a state.
    ///
    /// Any state is accepted by an empty plan; those operations short-circuit before indexing.
    pub fn check_state(&self, state: AnimationState) -> PlanResult<()> {
        let len = self.sequence.len();
        if len > 0 && state.step_number >= len {
            return Err(PlanError::invalid_index(state.step_number, len));
        }
        Ok(())
    }

    /// First step, traveling forward.
    pub fn get_initial_state(&self) -> Option<AnimationState> {
        (!self.is_empty()).then(|| AnimationState::new(0, Direction::Forward))
    }

    /// Last step, traveling forward.
    pub fn get_final_state(&self) -> Option<AnimationState> {
        let last = self.sequence.len().checked_sub(1)?;
        Some(AnimationState::new(last, Direction::Forward))
    }

    /// Span shown for `state`; the canonical zero span when the plan is empty.
    pub fn get_time_span_for_state(&self, state: AnimationState) -> PlanResult<TimeSpan> {
        if self.is_empty() {
            return Ok(TimeSpan::zero());
        }
        self.check_state(state)?;
        Ok(self.sequence[state.step_number])
    }

    /// One step in the state's direction, `None` when a STOP plan runs out.
    pub fn determine_next_state(
        &self,
        state: AnimationState,
    ) -> PlanResult<Option<AnimationState>> {
        self.step(state, 1)
    }

    /// One step against the state's direction (the direction itself is kept), `None` when a
    /// STOP plan runs out.
    pub fn determine_previous_state(
        &self,
        state: AnimationState,
    ) -> PlanResult<Option<AnimationState>> {
        self.step(state, -1)
    }

    fn step(&self, state: AnimationState, toward: i64) -> PlanResult<Option<AnimationState>> {
        self.check_state(state)?;
        let len = self.sequence.len();
        if len == 0 {
            return Ok(None);
        }

        if len == 1 {
            return Ok(match self.end_behavior {
                EndBehavior::Wrap => Some(state),
                EndBehavior::Bounce => Some(state.reverse()),
                EndBehavior::Stop => None,
            });
        }

        let dir = state.direction;
        let current = state.step_number as i64;
        let target = current + dir.sign() * toward;
        if (0..len as i64).contains(&target) {
            return Ok(Some(AnimationState::new(target as usize, dir)));
        }

        Ok(match self.end_behavior {
            EndBehavior::Wrap => Some(AnimationState::new(
                target.rem_euclid(len as i64) as usize,
                dir,
            )),
            EndBehavior::Bounce => {
                // `current` sits on the boundary, so one step inward is always in range.
                let flipped = dir.opposite();
                let inward = current + flipped.sign() * toward;
                Some(AnimationState::new(inward as usize, flipped))
            }
            EndBehavior::Stop => None,
        })
    }

    /// Number of [`Self::determine_next_state`] calls needed to get from `from` to the step of
    /// `to`, following `from`'s direction.
    ///
    /// Targets behind the direction of travel cost `len + delta` under WRAP and
    /// `2 * (steps to the boundary ahead) - delta` under BOUNCE; under STOP they are
    /// [`UNREACHABLE_DISTANCE`].
    pub fn calculate_distance(&self, from: AnimationState, to: AnimationState) -> PlanResult<i64> {
        self.check_state(from)?;
        self.check_state(to)?;
        if from.step_number == to.step_number {
            return Ok(0);
        }
        let len = self.sequence.len() as i64;
        if len == 0 {
            return Ok(UNREACHABLE_DISTANCE);
        }

        let (from_idx, to_idx) = (from.step_number as i64, to.step_number as i64);
        let delta = (to_idx - from_idx) * from.direction.sign();
        if delta >= 0 {
            return Ok(delta);
        }

        Ok(match self.end_behavior {
            EndBehavior::Wrap => len + delta,
            EndBehavior::Bounce => {
                let to_boundary = match from.direction {
                    Direction::Forward => len - 1 - from_idx,
                    Direction::Backward => from_idx,
                };
                2 * to_boundary - delta
            }
            EndBehavior::Stop => UNREACHABLE_DISTANCE,
        })
    }

    /// Map an arbitrary index (possibly far outside the sequence) onto a valid step.
    ///
    /// WRAP is modular, BOUNCE reflects with period `2 * (len - 1)`, STOP clamps.
    /// `None` for an empty plan.
    pub fn in_range_index(&self, index: i64) -> Option<usize> {
        let len = self.sequence.len() as i64;
        if len == 0 {
            return None;
        }
        let idx = match self.end_behavior {
            EndBehavior::Wrap => index.rem_euclid(len),
            EndBehavior::Bounce if len == 1 => 0,
            EndBehavior::Bounce => {
                let period = 2 * (len - 1);
                let m = index.rem_euclid(period);
                if m < len { m } else { period - m }
            }
            EndBehavior::Stop => index.clamp(0, len - 1),
        };
        Some(idx as usize)
    }

    /// `count` spans starting at `state`'s step and moving in `direction`.
    ///
    /// Every position is mapped through [`Self::in_range_index`], so exactly `count` spans are
    /// produced for a non-empty plan; STOP repeats the boundary span. Fails with
    /// [`PlanError::InvalidArgument`] when `count` spans cannot be allocated.
    pub fn get_animation_sequence(
        &self,
        state: AnimationState,
        count: usize,
        direction: Direction,
    ) -> PlanResult<Vec<TimeSpan>> {
        self.check_state(state)?;
        let start = state.step_number as i64;
        let mut out = Vec::new();
        if self.is_empty() {
            return Ok(out);
        }
        out.try_reserve_exact(count).map_err(|e| {
            PlanError::invalid_argument(format!("cannot build a sequence of {count} spans: {e}"))
        })?;
        for i in 0..count {
            let offset = (i as i64).saturating_mul(direction.sign());
            let Some(idx) = self.in_range_index(start.saturating_add(offset)) else {
                break;
            };
            out.push(self.sequence[idx]);
        }
        Ok(out)
    }

    /// State whose span contains `t`, or else the step whose midpoint is closest to `t`
    /// (first one wins ties). `None` for an empty plan.
    pub fn find_state_at(&self, t: Timestamp, direction: Direction) -> Option<AnimationState> {
        if let Some(idx) = self.sequence.iter().position(|s| s.contains_instant(t)) {
            return Some(AnimationState::new(idx, direction));
        }

        let mut best: Option<(usize, i128)> = None;
        for (idx, span) in self.sequence.iter().enumerate() {
            let Some(anchor) = span.midpoint().or(span.start()).or(span.end()) else {
                continue;
            };
            let dist = (i128::from(anchor.0) - i128::from(t.0)).abs();
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((idx, dist));
            }
        }
        best.map(|(idx, _)| AnimationState::new(idx, direction))
    }

    /// State best matching `span`: an identical step, else a step containing it, else the step
    /// with the smallest `|start delta| + |end delta|`. `None` for an empty plan.
    pub fn find_state_for_span(
        &self,
        span: TimeSpan,
        direction: Direction,
    ) -> Option<AnimationState> {
        let idx = self
            .sequence
            .iter()
            .position(|s| *s == span)
            .or_else(|| self.sequence.iter().position(|s| s.contains_span(span)))
            .or_else(|| self.closest_by_offsets(span))?;
        Some(AnimationState::new(idx, direction))
    }

    fn closest_by_offsets(&self, span: TimeSpan) -> Option<usize> {
        let mut best: Option<(usize, i128)> = None;
        for (idx, s) in self.sequence.iter().enumerate() {
            let cost = bound_offset(s.start(), span.start())
                .saturating_add(bound_offset(s.end(), span.end()));
            if best.is_none_or(|(_, c)| cost < c) {
                best = Some((idx, cost));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Gap between the first two step starts, or the single step's length.
    pub fn get_advance_duration(&self) -> Duration {
        let millis = match self.sequence.as_slice() {
            [] => None,
            [only] => only.duration_millis(),
            [first, second, ..] => second
                .start()
                .zip(first.start())
                .map(|(b, a)| b.millis_since(a)),
        };
        Duration::millis(millis.unwrap_or(0))
    }

    /// Span from the first step's start to the last step's end.
    pub fn get_limit_window(&self) -> TimeSpan {
        let mut spans = self.sequence.iter().copied();
        match spans.next() {
            Some(first) => spans.fold(first, TimeSpan::hull),
            None => TimeSpan::zero(),
        }
    }
}

/// Absolute distance between two bounds of the same kind; unbounded matches only unbounded.
fn bound_offset(a: Option<Timestamp>, b: Option<Timestamp>) -> i128 {
    match (a, b) {
        (Some(a), Some(b)) => (i128::from(a.0) - i128::from(b.0)).abs(),
        (None, None) => 0,
        _ => i128::MAX,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/discrete.rs"]
mod tests;
