//! timeplan plans how an animation moves through time.
//!
//! A plan is an ordered list of time spans (steps) plus a rule for what happens at the ends of
//! the list. Callers hold a small state value and ask the plan where to go next; plans never
//! mutate, start timers or render anything.
//!
//! # Plan kinds
//!
//! - [`AnimationPlan`]: discrete playback, one step per frame.
//! - [`ContinuousAnimationPlan`]: a sliding active window that advances through each step by a
//!   fixed sub-step and rolls over into the next step when it no longer fits.
//!
//! Both are wrapped by [`Plan`] and driven through [`PlanState`]. [`AnimationPlanFactory`]
//! builds plans from a loop span and the spans the user chose to skip, and [`PlanDef`] does the
//! same from JSON.
//!
//! # End behaviors
//!
//! [`EndBehavior::Wrap`] continues from the other end, [`EndBehavior::Bounce`] reverses,
//! [`EndBehavior::Stop`] reports `None` from the stepping operations.
//!
//! # Getting started
//!
//! ```
//! use timeplan::{AnimationPlanFactory, Duration, Plan, Playback, PlaybackConfig, TimeSpan,
//!     Timestamp};
//!
//! let loop_span = TimeSpan::bounded(Timestamp(0), Timestamp(100))?;
//! let skipped = [TimeSpan::bounded(Timestamp(25), Timestamp(50))?];
//! let plan = AnimationPlanFactory::create_default_plan(loop_span, Duration::millis(25), &skipped)?;
//!
//! let mut playback = Playback::new(Plan::from(plan), PlaybackConfig::default())?;
//! playback.step_forward()?;
//! assert_eq!(
//!     playback.time_span()?,
//!     Some(TimeSpan::bounded(Timestamp(50), Timestamp(75))?)
//! );
//! # Ok::<(), timeplan::PlanError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// JSON plan definitions and caller-side playback.
pub mod config;
/// Time primitives and the error type.
pub mod foundation;
pub mod plan;

pub use config::model::{PlanDef, PlanDocument};
pub use config::playback::{Playback, PlaybackConfig};
pub use foundation::error::{PlanError, PlanResult};
pub use foundation::span::TimeSpan;
pub use foundation::time::{Duration, Timestamp};
pub use plan::continuous::ContinuousAnimationPlan;
pub use plan::discrete::{AnimationPlan, UNREACHABLE_DISTANCE};
pub use plan::dispatch::Plan;
pub use plan::factory::AnimationPlanFactory;
pub use plan::state::{
    AnimationState, ContinuousAnimationState, Direction, EndBehavior, PlanState,
};
