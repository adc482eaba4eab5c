use crate::foundation::span::TimeSpan;

/// Traversal direction through a plan's sequence.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward higher step numbers.
    #[default]
    Forward,
    /// Toward lower step numbers.
    Backward,
}

impl Direction {
    /// The other direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// `+1` for forward, `-1` for backward.
    pub fn sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// What happens when stepping would leave the sequence.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EndBehavior {
    /// Continue from the opposite end, keeping the direction.
    #[default]
    Wrap,
    /// Reflect off the boundary and reverse the direction.
    Bounce,
    /// Terminate: there is no next state.
    Stop,
}

/// Position of a cursor in a discrete plan: a step number and a direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AnimationState {
    /// Zero-based index into the plan's sequence.
    pub step_number: usize,
    /// Direction of travel.
    pub direction: Direction,
}

impl AnimationState {
    /// Create a state at `step_number` traveling in `direction`.
    pub fn new(step_number: usize, direction: Direction) -> Self {
        Self {
            step_number,
            direction,
        }
    }

    /// Same step, opposite direction.
    pub fn reverse(self) -> Self {
        Self {
            step_number: self.step_number,
            direction: self.direction.opposite(),
        }
    }
}

/// Discrete state plus the sliding window currently shown inside that step's span.
///
/// The window is checked against the owning plan whenever the state is handed back to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ContinuousAnimationState {
    /// Parent step and direction.
    pub state: AnimationState,
    /// Active sub-window inside the parent step's span.
    pub active_time_span: TimeSpan,
}

impl ContinuousAnimationState {
    /// Create a continuous state.
    pub fn new(step_number: usize, direction: Direction, active_time_span: TimeSpan) -> Self {
        Self {
            state: AnimationState::new(step_number, direction),
            active_time_span,
        }
    }

    /// Parent step number.
    pub fn step_number(&self) -> usize {
        self.state.step_number
    }

    /// Direction of travel.
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Same step and window, opposite direction.
    pub fn reverse(self) -> Self {
        Self {
            state: self.state.reverse(),
            active_time_span: self.active_time_span,
        }
    }
}

/// State handed to and returned by a [`crate::Plan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanState {
    /// State of a discrete plan.
    Discrete(AnimationState),
    /// State of a continuous plan.
    Continuous(ContinuousAnimationState),
}

impl PlanState {
    /// The discrete part of the state.
    pub fn discrete(&self) -> AnimationState {
        match self {
            Self::Discrete(s) => *s,
            Self::Continuous(c) => c.state,
        }
    }

    /// Parent step number.
    pub fn step_number(&self) -> usize {
        self.discrete().step_number
    }

    /// Direction of travel.
    pub fn direction(&self) -> Direction {
        self.discrete().direction
    }

    /// Active window for continuous states.
    pub fn active_time_span(&self) -> Option<TimeSpan> {
        match self {
            Self::Discrete(_) => None,
            Self::Continuous(c) => Some(c.active_time_span),
        }
    }

    /// Same position, opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Self::Discrete(s) => Self::Discrete(s.reverse()),
            Self::Continuous(c) => Self::Continuous(c.reverse()),
        }
    }
}

impl From<AnimationState> for PlanState {
    fn from(s: AnimationState) -> Self {
        Self::Discrete(s)
    }
}

impl From<ContinuousAnimationState> for PlanState {
    fn from(s: ContinuousAnimationState) -> Self {
        Self::Continuous(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/state.rs"]
mod tests;
