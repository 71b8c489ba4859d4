pub mod code_generator;
pub mod email;
pub mod html;
pub mod mail_templates;
pub mod phone;
pub mod slug;

pub use code_generator::{generate_six_digit_code, generate_unsubscribe_token};
pub use email::*;
pub use html::escape_html;
pub use phone::*;
pub use slug::slugify;
