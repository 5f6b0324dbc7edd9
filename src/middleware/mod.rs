mod session;

pub use session::{session_gate, CurrentUser, SESSION_COOKIE};
