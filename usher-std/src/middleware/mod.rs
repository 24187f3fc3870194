//! Stock middleware layers.
//!
//! Each of these wraps the same terminal handler invocation without the
//! handler being aware of it. Order matters: the first layer given to the
//! router wraps outermost, so recovery typically goes first and throttling
//! before authority checks.

mod authorize;
mod recover;
mod throttle;
mod timeout;
mod trace;

pub use authorize::Authorize;
pub use recover::CatchPanic;
pub use throttle::Throttle;
pub use timeout::Timeout;
pub use trace::Trace;
