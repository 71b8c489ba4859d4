pub mod blog;
pub mod featured_property;
pub mod leads;
pub mod newsletter;
pub mod property;
pub mod subscriber;
pub mod testimonial;

pub use blog::blog_config;
pub use featured_property::featured_property_config;
pub use leads::lead_config;
pub use newsletter::newsletter_config;
pub use property::property_config;
pub use subscriber::subscriber_config;
pub use testimonial::testimonial_config;
