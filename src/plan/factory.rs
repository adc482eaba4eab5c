use crate::{
    foundation::{
        error::{PlanError, PlanResult},
        span::TimeSpan,
        time::{Duration, Timestamp},
    },
    plan::{
        continuous::ContinuousAnimationPlan, discrete::AnimationPlan, state::EndBehavior,
    },
};

/// Builds plans from a loop span, step sizes and the spans the user skipped.
///
/// Both builders are pure; the resulting plans use [`EndBehavior::Wrap`].
pub struct AnimationPlanFactory;

impl AnimationPlanFactory {
    /// Cut `loop_span` into consecutive `frame_duration` steps, dropping every step that overlaps
    /// a skipped span.
    ///
    /// Dropped steps leave gaps; later steps keep their boundaries. Step `i` starts at
    /// `loop_start + i * frame_duration`, so calendar durations do not drift, and the last step
    /// may extend past the loop end.
    #[tracing::instrument(skip(skipped), fields(skipped_count = skipped.len()))]
    pub fn create_default_plan(
        loop_span: TimeSpan,
        frame_duration: Duration,
        skipped: &[TimeSpan],
    ) -> PlanResult<AnimationPlan> {
        let (start, end) = bounded(loop_span, "loop span")?;
        if !frame_duration.is_positive() {
            return Err(PlanError::invalid_argument(format!(
                "frame duration must be > 0, got {frame_duration}"
            )));
        }

        let mut sequence = Vec::new();
        let mut dropped = 0usize;
        let mut frame_start = start;
        let mut i = 1i64;
        while frame_start < end {
            let frame_end = start.plus(frame_duration.times(i));
            if frame_end <= frame_start {
                // Saturated at the end of representable time.
                break;
            }
            let frame = TimeSpan::bounded(frame_start, frame_end)?;
            if frame.overlaps_any(skipped) {
                dropped += 1;
            } else {
                sequence.push(frame);
            }
            frame_start = frame_end;
            i += 1;
        }

        tracing::debug!(steps = sequence.len(), dropped, "built discrete plan");
        Ok(AnimationPlan::new(sequence, EndBehavior::Wrap))
    }

    /// `sequence_span` minus the skipped spans, keeping only pieces long enough for one active
    /// window. `loop_span` becomes the limit window.
    #[tracing::instrument(skip(skipped), fields(skipped_count = skipped.len()))]
    pub fn create_continuous_plan(
        loop_span: TimeSpan,
        sequence_span: TimeSpan,
        active_duration: Duration,
        advance_duration: Duration,
        skipped: &[TimeSpan],
    ) -> PlanResult<ContinuousAnimationPlan> {
        bounded(sequence_span, "sequence span")?;

        let mut sequence = sequence_span.subtract(skipped);
        let pieces = sequence.len();
        sequence.retain(|piece| fits_window(*piece, active_duration));

        tracing::debug!(
            steps = sequence.len(),
            dropped = pieces - sequence.len(),
            "built continuous plan"
        );
        let limit = (!loop_span.is_timeless()).then_some(loop_span);
        ContinuousAnimationPlan::new(
            sequence,
            active_duration,
            advance_duration,
            EndBehavior::Wrap,
            limit,
        )
    }
}

fn bounded(span: TimeSpan, what: &str) -> PlanResult<(Timestamp, Timestamp)> {
    span.start()
        .zip(span.end())
        .ok_or_else(|| PlanError::invalid_argument(format!("{what} must be bounded, got {span}")))
}

fn fits_window(piece: TimeSpan, active: Duration) -> bool {
    match (piece.start(), piece.end()) {
        (Some(start), Some(end)) => start.plus(active) <= end,
        _ => true,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/factory.rs"]
mod tests;
