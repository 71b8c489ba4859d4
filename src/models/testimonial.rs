use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::testimonial_entity as testimonials;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateTestimonialRequest {
    #[schema(example = "Rahul Mehta")]
    pub name: Option<String>,
    #[schema(example = "Smooth purchase from site visit to registration.")]
    pub message: Option<String>,
    #[schema(example = "Investor")]
    pub designation: Option<String>,
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: Option<i16>,
    pub is_active: Option<bool>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTestimonialRequest {
    pub name: Option<String>,
    pub message: Option<String>,
    pub designation: Option<String>,
    pub rating: Option<i16>,
    pub is_active: Option<bool>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestimonialResponse {
    pub id: i64,
    pub name: String,
    pub message: String,
    pub image: Option<String>,
    pub designation: String,
    pub rating: i16,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<testimonials::Model> for TestimonialResponse {
    fn from(t: testimonials::Model) -> Self {
        Self {
            id: t.id,
            name: t.name,
            message: t.message,
            image: t.image,
            designation: t.designation,
            rating: t.rating,
            is_active: t.is_active,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}
