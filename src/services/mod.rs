pub mod blog_service;
pub mod featured_property_service;
pub mod lead_service;
pub mod lead_verification_service;
pub mod newsletter_service;
pub mod otp_store;
pub mod property_service;
pub mod subscriber_service;
pub mod testimonial_service;

pub use blog_service::*;
pub use featured_property_service::*;
pub use lead_service::*;
pub use lead_verification_service::*;
pub use newsletter_service::*;
pub use otp_store::*;
pub use property_service::*;
pub use subscriber_service::*;
pub use testimonial_service::*;
