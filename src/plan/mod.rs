//! Animation plans: ordered step spans and the rules for moving through them.
//!
//! [`discrete::AnimationPlan`] snaps playback to whole steps.
//! [`continuous::ContinuousAnimationPlan`] slides an active window through each step. [`dispatch::Plan`] wraps both behind
//! [`state::PlanState`], and [`factory::AnimationPlanFactory`] builds them from a loop span.

/// Sliding-window plans.
pub mod continuous;
/// Frame-snapped plans.
pub mod discrete;
/// The `Plan` sum type.
pub mod dispatch;
/// Plan builders.
pub mod factory;
/// Playback cursors and end-of-sequence policies.
pub mod state;
