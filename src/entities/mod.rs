pub mod blogs;
pub mod featured_properties;
pub mod leads;
pub mod newsletters;
pub mod properties;
pub mod subscribers;
pub mod testimonials;

pub use blogs as blog_entity;
pub use featured_properties as featured_property_entity;
pub use leads as lead_entity;
pub use newsletters as newsletter_entity;
pub use properties as property_entity;
pub use subscribers as subscriber_entity;
pub use testimonials as testimonial_entity;
