pub mod error;
pub mod feature_flags;
pub mod session;

// Portal domain
pub mod attendance;
pub mod leave;
pub mod role;

pub use error::*;
pub use feature_flags::*;
pub use session::*;

pub use attendance::*;
pub use leave::*;
pub use role::*;
