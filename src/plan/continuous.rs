use crate::{
    foundation::{
        error::{PlanError, PlanResult},
        span::TimeSpan,
        time::{Duration, Timestamp},
    },
    plan::{
        discrete::AnimationPlan,
        state::{AnimationState, ContinuousAnimationState, Direction, EndBehavior},
    },
};

/// Discrete plan overlaid with a sliding active window.
///
/// Within each parent step the window advances by `advance` (independent of the parent step
/// size) until it no longer fits; the parent plan then moves to the next step that overlaps the
/// limit window and the window is re-anchored at that step's leading edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinuousAnimationPlan {
    discrete: AnimationPlan,
    active_window: Duration,
    advance: Duration,
    limit_window: TimeSpan,
}

impl ContinuousAnimationPlan {
    /// Create a continuous plan.
    ///
    /// Every span in `sequence` must be bounded and both durations strictly positive. Without a
    /// `limit_window` sub-stepping is allowed over the whole sequence.
    pub fn new(
        sequence: Vec<TimeSpan>,
        active_window: Duration,
        advance: Duration,
        end_behavior: EndBehavior,
        limit_window: Option<TimeSpan>,
    ) -> PlanResult<Self> {
        if let Some((idx, span)) = sequence.iter().enumerate().find(|(_, s)| !s.is_bounded()) {
            return Err(PlanError::invalid_argument(format!(
                "continuous plans need bounded steps; step {idx} is {span}"
            )));
        }
        if !active_window.is_positive() {
            return Err(PlanError::invalid_argument(format!(
                "active window duration must be > 0, got {active_window}"
            )));
        }
        if !advance.is_positive() {
            return Err(PlanError::invalid_argument(format!(
                "advance duration must be > 0, got {advance}"
            )));
        }
        Ok(Self {
            discrete: AnimationPlan::new(sequence, end_behavior),
            active_window,
            advance,
            limit_window: limit_window.unwrap_or_else(TimeSpan::timeless),
        })
    }

    /// Same plan clamped to a different limit window (`None` removes the clamp).
    pub fn with_limit_window(self, limit_window: Option<TimeSpan>) -> Self {
        Self {
            limit_window: limit_window.unwrap_or_else(TimeSpan::timeless),
            ..self
        }
    }

    /// Same plan under a different end behavior.
    pub fn with_end_behavior(self, end_behavior: EndBehavior) -> Self {
        Self {
            discrete: self.discrete.with_end_behavior(end_behavior),
            ..self
        }
    }

    /// The parent discrete plan.
    pub fn discrete(&self) -> &AnimationPlan {
        &self.discrete
    }

    /// Size of the sliding window.
    pub fn active_window_duration(&self) -> Duration {
        self.active_window
    }

    /// Sub-step size.
    pub fn get_advance_duration(&self) -> Duration {
        self.advance
    }

    /// Configured clamp; timeless when none was supplied.
    pub fn limit_window(&self) -> TimeSpan {
        self.limit_window
    }

    /// Effective bounds of playback: the limit window, or the whole sequence when unclamped.
    pub fn get_limit_window(&self) -> TimeSpan {
        if self.limit_window.is_timeless() {
            self.discrete.get_limit_window()
        } else {
            self.limit_window
        }
    }

    /// First step overlapping the limit window, window anchored at its start.
    pub fn get_initial_state(&self) -> PlanResult<Option<ContinuousAnimationState>> {
        let Some(idx) = self.steps().position(|s| s.overlaps(self.limit_window)) else {
            return Ok(None);
        };
        let window = self.anchor(self.limited_span(idx)?, true)?;
        Ok(Some(ContinuousAnimationState::new(
            idx,
            Direction::Forward,
            window,
        )))
    }

    /// The active window of `state`; the canonical zero span when the plan is empty.
    pub fn get_time_span_for_state(
        &self,
        state: ContinuousAnimationState,
    ) -> PlanResult<TimeSpan> {
        if self.discrete.is_empty() {
            return Ok(TimeSpan::zero());
        }
        self.validated_spans(state)?;
        Ok(state.active_time_span)
    }

    /// Slide the window one sub-step in the state's direction, rolling over into the next
    /// parent step when it no longer fits. `None` when a STOP plan runs out.
    pub fn determine_next_state(
        &self,
        state: ContinuousAnimationState,
    ) -> PlanResult<Option<ContinuousAnimationState>> {
        self.step(state, 1)
    }

    /// Mirror of [`Self::determine_next_state`]: slide against the state's direction.
    pub fn determine_previous_state(
        &self,
        state: ContinuousAnimationState,
    ) -> PlanResult<Option<ContinuousAnimationState>> {
        self.step(state, -1)
    }

    fn step(
        &self,
        state: ContinuousAnimationState,
        toward: i64,
    ) -> PlanResult<Option<ContinuousAnimationState>> {
        if self.discrete.is_empty() {
            return Ok(None);
        }
        let (_, limited) = self.validated_spans(state)?;
        let later = state.direction().sign() * toward > 0;

        let active = state.active_time_span;
        let moved = if limited.contains_span(active) {
            let shift = if later {
                self.advance
            } else {
                self.advance.negate()
            };
            active.plus(shift)
        } else {
            tracing::debug!(
                step = state.step_number(),
                %active,
                "active window outside limited step span, re-anchoring"
            );
            self.anchor(limited, later)?
        };

        if limited.contains_span(moved) {
            return Ok(Some(ContinuousAnimationState {
                state: state.state,
                active_time_span: moved,
            }));
        }

        let Some(parent) = self.next_parent(state.state, toward)? else {
            return Ok(None);
        };
        tracing::debug!(
            from = state.step_number(),
            to = parent.step_number,
            "active window rolled over into another step"
        );
        let later = parent.direction.sign() * toward > 0;
        let window = self.anchor(self.limited_span(parent.step_number)?, later)?;
        Ok(Some(ContinuousAnimationState {
            state: parent,
            active_time_span: window,
        }))
    }

    /// Step the parent plan until a step overlaps the limit window.
    fn next_parent(
        &self,
        from: AnimationState,
        toward: i64,
    ) -> PlanResult<Option<AnimationState>> {
        let mut cursor = from;
        for _ in 0..=2 * self.discrete.len() {
            let next = if toward > 0 {
                self.discrete.determine_next_state(cursor)?
            } else {
                self.discrete.determine_previous_state(cursor)?
            };
            let Some(next) = next else {
                return Ok(None);
            };
            if cursor == from && next.direction != from.direction {
                // The parent already stepped inward off the boundary; the window only reverses.
                tracing::debug!(step = from.step_number, "bounce at the end of the sequence");
                return Ok(Some(from.reverse()));
            }
            if self.discrete.sequence()[next.step_number].overlaps(self.limit_window) {
                return Ok(Some(next));
            }
            cursor = next;
        }
        Ok(None)
    }

    /// Last window reachable in the state's direction, computed in closed form.
    ///
    /// Fails with [`PlanError::Unsupported`] when the advance duration is calendar-relative.
    pub fn get_final_state(
        &self,
        state: ContinuousAnimationState,
    ) -> PlanResult<Option<ContinuousAnimationState>> {
        if self.discrete.is_empty() {
            return Ok(None);
        }
        self.validated_spans(state)?;
        let advance_ms = self.advance.as_millis().ok_or_else(|| {
            PlanError::unsupported(format!(
                "final state needs a fixed advance duration, got {}",
                self.advance
            ))
        })?;

        let direction = state.direction();
        let limit = self.limit_window;
        let idx = match direction {
            Direction::Forward => self.steps().rposition(|s| s.overlaps(limit)),
            Direction::Backward => self.steps().position(|s| s.overlaps(limit)),
        };
        let Some(idx) = idx else {
            return Ok(None);
        };

        let limited = self.limited_span(idx)?;
        let (start, end) = bounds(limited)?;
        let first = self.anchor(limited, direction == Direction::Forward)?;
        let (first_start, first_end) = bounds(first)?;
        let gap = match direction {
            Direction::Forward => end.millis_since(first_end),
            Direction::Backward => first_start.millis_since(start),
        };
        let steps = gap.max(0) / advance_ms;
        let shift = Duration::millis(steps.saturating_mul(advance_ms) * direction.sign());
        Ok(Some(ContinuousAnimationState::new(
            idx,
            direction,
            first.plus(shift),
        )))
    }

    /// State whose parent step contains (or is nearest to) `t`, with the window anchored at `t`
    /// and clamped into that step. Probes outside the limit window are moved to its nearest edge.
    pub fn find_state_at(
        &self,
        t: Timestamp,
        direction: Direction,
    ) -> PlanResult<Option<ContinuousAnimationState>> {
        let probe = self.clamp_to_limit(t);
        let Some(parent) = self.discrete.find_state_at(probe, direction) else {
            return Ok(None);
        };
        let Some(parent) = self.overlapping_or_nearest(parent, probe) else {
            return Ok(None);
        };
        let window = match direction {
            Direction::Forward => TimeSpan::from_start(probe, self.active_window),
            // Ends at the exclusive limit edge itself, not its last millisecond.
            Direction::Backward => {
                let end = match self.limit_window.end() {
                    Some(end) if t >= end => end,
                    _ => probe,
                };
                TimeSpan::from_end(end, self.active_window)
            }
        };
        self.clamped_state(parent, window).map(Some)
    }

    /// State whose parent step best matches `span`, with the window anchored at the span's start
    /// (forward) or end (backward) and clamped into that step.
    pub fn find_state_for_span(
        &self,
        span: TimeSpan,
        direction: Direction,
    ) -> PlanResult<Option<ContinuousAnimationState>> {
        let probe = span.intersection(self.limit_window).unwrap_or_else(|| {
            let edge = span.start().or(span.end()).unwrap_or(Timestamp::EPOCH);
            TimeSpan::instant(self.clamp_to_limit(edge))
        });
        let Some(parent) = self.discrete.find_state_for_span(probe, direction) else {
            return Ok(None);
        };
        let (parent_start, parent_end) = bounds(self.parent_span(parent.step_number)?)?;
        let near = probe.midpoint().or(probe.start()).unwrap_or(parent_start);
        let Some(parent) = self.overlapping_or_nearest(parent, near) else {
            return Ok(None);
        };
        let window = match direction {
            Direction::Forward => {
                TimeSpan::from_start(probe.start().unwrap_or(parent_start), self.active_window)
            }
            Direction::Backward => {
                TimeSpan::from_end(probe.end().unwrap_or(parent_end), self.active_window)
            }
        };
        self.clamped_state(parent, window).map(Some)
    }

    /// Parent spans starting at `state`'s step; see [`AnimationPlan::get_animation_sequence`].
    pub fn get_animation_sequence(
        &self,
        state: ContinuousAnimationState,
        count: usize,
        direction: Direction,
    ) -> PlanResult<Vec<TimeSpan>> {
        if !self.discrete.is_empty() {
            self.validated_spans(state)?;
        }
        self.discrete.get_animation_sequence(state.state, count, direction)
    }

    /// Parent-step distance between two states; see [`AnimationPlan::calculate_distance`].
    pub fn calculate_distance(
        &self,
        from: ContinuousAnimationState,
        to: ContinuousAnimationState,
    ) -> PlanResult<i64> {
        if !self.discrete.is_empty() {
            self.validated_spans(from)?;
            self.validated_spans(to)?;
        }
        self.discrete.calculate_distance(from.state, to.state)
    }

    fn steps(&self) -> impl DoubleEndedIterator<Item = TimeSpan> + ExactSizeIterator + '_ {
        self.discrete.sequence().iter().copied()
    }

    /// Move `t` inside the limit window (its last millisecond for the exclusive end).
    fn clamp_to_limit(&self, t: Timestamp) -> Timestamp {
        let mut t = t;
        if let Some(end) = self.limit_window.end()
            && t >= end
        {
            t = end.minus(Duration::millis(1));
        }
        if let Some(start) = self.limit_window.start() {
            t = t.max(start);
        }
        t
    }

    /// `found` if its step overlaps the limit window, else the overlapping step whose midpoint
    /// is nearest to `t`.
    fn overlapping_or_nearest(
        &self,
        found: AnimationState,
        t: Timestamp,
    ) -> Option<AnimationState> {
        let limit = self.limit_window;
        if self.discrete.sequence()[found.step_number].overlaps(limit) {
            return Some(found);
        }
        let idx = self
            .steps()
            .enumerate()
            .filter(|(_, s)| s.overlaps(limit))
            .filter_map(|(idx, s)| {
                let mid = s.midpoint()?;
                Some((idx, (i128::from(mid.0) - i128::from(t.0)).abs()))
            })
            .min_by_key(|&(idx, dist)| (dist, idx))?
            .0;
        Some(AnimationState::new(idx, found.direction))
    }

    fn parent_span(&self, idx: usize) -> PlanResult<TimeSpan> {
        self.discrete
            .sequence()
            .get(idx)
            .copied()
            .ok_or_else(|| PlanError::invalid_index(idx, self.discrete.len()))
    }

    fn limited_span(&self, idx: usize) -> PlanResult<TimeSpan> {
        let parent = self.parent_span(idx)?;
        parent.intersection(self.limit_window).ok_or_else(|| {
            PlanError::invalid_argument(format!(
                "step {idx} span {parent} does not overlap the limit window {}",
                self.limit_window
            ))
        })
    }

    /// Check `state` against the plan and return its parent span and the limited parent span.
    fn validated_spans(
        &self,
        state: ContinuousAnimationState,
    ) -> PlanResult<(TimeSpan, TimeSpan)> {
        let idx = state.step_number();
        let parent = self.parent_span(idx)?;
        if !parent.contains_span(state.active_time_span) {
            return Err(PlanError::invalid_argument(format!(
                "active window {} is not inside step {idx} span {parent}",
                state.active_time_span
            )));
        }
        Ok((parent, self.limited_span(idx)?))
    }

    /// Window of the active duration at the leading edge of `limited`, clipped to it.
    fn anchor(&self, limited: TimeSpan, at_start: bool) -> PlanResult<TimeSpan> {
        let (start, end) = bounds(limited)?;
        let window = if at_start {
            TimeSpan::from_start(start, self.active_window)
        } else {
            TimeSpan::from_end(end, self.active_window)
        };
        Ok(window.intersection(limited).unwrap_or(limited))
    }

    /// Slide `window` into the step's limited span, shrinking it only when it is longer than
    /// that span.
    fn clamped_state(
        &self,
        parent: AnimationState,
        window: TimeSpan,
    ) -> PlanResult<ContinuousAnimationState> {
        let target = self.limited_span(parent.step_number)?;
        let (start, end) = bounds(target)?;
        let (w_start, w_end) = bounds(window)?;

        let len = w_end.millis_since(w_start);
        let window = if len >= end.millis_since(start) {
            target
        } else {
            let latest = end.minus(Duration::millis(len));
            let s = w_start.clamp(start, latest);
            TimeSpan::from_start(s, Duration::millis(len))
        };
        Ok(ContinuousAnimationState {
            state: parent,
            active_time_span: window,
        })
    }
}

fn bounds(span: TimeSpan) -> PlanResult<(Timestamp, Timestamp)> {
    span.start().zip(span.end()).ok_or_else(|| {
        PlanError::invalid_argument(format!("expected a bounded span, got {span}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/plan/continuous.rs"]
mod tests;
