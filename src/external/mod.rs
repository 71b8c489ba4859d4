pub mod attachments;
pub mod brevo;
pub mod notification;

pub use attachments::*;
pub use brevo::*;
pub use notification::*;
