//! Session identity and lifecycle phase.

mod id;
mod state;

pub use id::SessionId;
pub use state::SessionPhase;
