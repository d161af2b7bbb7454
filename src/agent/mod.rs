//! Shared meetup state, its update log, and the session that owns both.

mod state;
pub use state::*;

mod update_log;
pub use update_log::*;

mod session;
pub use session::*;
