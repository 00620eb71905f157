#[cfg(feature = "server")]
pub(crate) mod guard;

mod session;
pub use session::*;

mod dashboard;
pub use dashboard::*;
