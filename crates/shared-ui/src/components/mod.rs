pub mod button;
pub mod card;
pub mod input;
pub mod page_header;
pub mod skeleton;
pub mod stat_card;
pub mod toast;

pub use button::*;
pub use card::*;
pub use input::*;
pub use page_header::*;
pub use skeleton::*;
pub use stat_card::*;
pub use toast::*;
