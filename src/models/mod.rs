pub mod blog;
pub mod common;
pub mod featured_property;
pub mod lead;
pub mod newsletter;
pub mod pagination;
pub mod property;
pub mod subscriber;
pub mod testimonial;

pub use blog::*;
pub use common::*;
pub use featured_property::*;
pub use lead::*;
pub use newsletter::*;
pub use pagination::*;
pub use property::*;
pub use subscriber::*;
pub use testimonial::*;
