/// Error type and result alias shared by the crate.
pub mod error;
/// Bounded/unbounded time spans.
pub mod span;
/// Instants and fixed or calendar durations.
pub mod time;
