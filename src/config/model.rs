use crate::{
    config::playback::PlaybackConfig,
    foundation::{
        error::{PlanError, PlanResult},
        span::TimeSpan,
        time::Duration,
    },
    plan::{dispatch::Plan, factory::AnimationPlanFactory, state::EndBehavior},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Serializable description of a plan, turned into a [`Plan`] by [`PlanDef::build`].
///
/// ```json
/// { "kind": "discrete",
///   "loop_span": { "start": 0, "end": 100 },
///   "frame_duration": { "millis": 25 },
///   "skipped": [{ "start": 40, "end": 60 }],
///   "end_behavior": "bounce" }
/// ```
pub enum PlanDef {
    /// Loop span cut into fixed-size frames.
    Discrete {
        /// Span to cut into frames; must be bounded.
        loop_span: TimeSpan,
        /// Size of each frame.
        frame_duration: Duration,
        /// Frames overlapping any of these are dropped.
        #[serde(default)]
        skipped: Vec<TimeSpan>,
        /// End-of-sequence policy.
        #[serde(default)]
        end_behavior: EndBehavior,
    },
    /// Sequence span minus the skipped spans, traversed by a sliding window.
    Continuous {
        /// Limit window; timeless for no clamp.
        loop_span: TimeSpan,
        /// Span the steps are carved from; must be bounded.
        sequence_span: TimeSpan,
        /// Size of the sliding window.
        active_duration: Duration,
        /// Sub-step size.
        advance_duration: Duration,
        /// Removed from the sequence span.
        #[serde(default)]
        skipped: Vec<TimeSpan>,
        /// End-of-sequence policy.
        #[serde(default)]
        end_behavior: EndBehavior,
    },
}

impl PlanDef {
    /// Parse a JSON plan definition.
    pub fn from_json(s: &str) -> PlanResult<Self> {
        serde_json::from_str(s).map_err(|e| PlanError::serde(e.to_string()))
    }

    /// End-of-sequence policy of the definition.
    pub fn end_behavior(&self) -> EndBehavior {
        match self {
            Self::Discrete { end_behavior, .. } | Self::Continuous { end_behavior, .. } => {
                *end_behavior
            }
        }
    }

    /// Check the definition without building it.
    pub fn validate(&self) -> PlanResult<()> {
        match self {
            Self::Discrete {
                loop_span,
                frame_duration,
                ..
            } => {
                if !loop_span.is_bounded() {
                    return Err(PlanError::validation(format!(
                        "discrete loop_span must be bounded, got {loop_span}"
                    )));
                }
                if !frame_duration.is_positive() {
                    return Err(PlanError::validation(format!(
                        "frame_duration must be > 0, got {frame_duration}"
                    )));
                }
            }
            Self::Continuous {
                sequence_span,
                active_duration,
                advance_duration,
                ..
            } => {
                if !sequence_span.is_bounded() {
                    return Err(PlanError::validation(format!(
                        "sequence_span must be bounded, got {sequence_span}"
                    )));
                }
                for (name, d) in [
                    ("active_duration", active_duration),
                    ("advance_duration", advance_duration),
                ] {
                    if !d.is_positive() {
                        return Err(PlanError::validation(format!("{name} must be > 0, got {d}")));
                    }
                }
            }
        }
        Ok(())
    }

    /// Validate, then build the plan through [`AnimationPlanFactory`].
    #[tracing::instrument(skip(self), fields(end_behavior = ?self.end_behavior()))]
    pub fn build(&self) -> PlanResult<Plan> {
        self.validate()?;
        let plan = match self {
            Self::Discrete {
                loop_span,
                frame_duration,
                skipped,
                end_behavior,
            } => AnimationPlanFactory::create_default_plan(*loop_span, *frame_duration, skipped)?
                .with_end_behavior(*end_behavior)
                .into(),
            Self::Continuous {
                loop_span,
                sequence_span,
                active_duration,
                advance_duration,
                skipped,
                end_behavior,
            } => AnimationPlanFactory::create_continuous_plan(
                *loop_span,
                *sequence_span,
                *active_duration,
                *advance_duration,
                skipped,
            )?
            .with_end_behavior(*end_behavior)
            .into(),
        };
        Ok(plan)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A plan definition together with its playback options; the file format read by the CLI.
pub struct PlanDocument {
    /// What to play.
    pub plan: PlanDef,
    /// How to play it.
    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl PlanDocument {
    /// Parse a JSON plan document.
    pub fn from_json(s: &str) -> PlanResult<Self> {
        serde_json::from_str(s).map_err(|e| PlanError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
