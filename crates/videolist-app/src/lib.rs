/// videolist presentation state.
///
/// Drives `videolist-core` the way a list screen would: refresh on demand,
/// pick up the background result on the next poll, replace the list, and
/// turn a tap on a row into something a player can open. Rendering is left
/// to the frontend.
pub mod play;
pub mod state;

pub use play::PlayTarget;
pub use state::{AppPhase, AppState};
