/// Serde plan definitions.
pub mod model;
/// Playback options and the caller-owned cursor.
pub mod playback;
