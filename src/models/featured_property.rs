use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::featured_property_entity as featured_properties;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateFeaturedPropertyRequest {
    #[schema(example = "Lakeside Villas")]
    pub title: Option<String>,
    #[schema(example = "lakeside-villas")]
    pub slug: Option<String>,
    #[schema(example = "Hinjewadi, Pune")]
    pub location: Option<String>,
    #[schema(example = 12500000.0)]
    pub price: Option<f64>,
    #[schema(example = "https://files.oaklyn.test/featured/lakeside.jpg")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateFeaturedPropertyRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeaturedPropertyResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub location: String,
    pub price: f64,
    pub image: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<featured_properties::Model> for FeaturedPropertyResponse {
    fn from(p: featured_properties::Model) -> Self {
        Self {
            id: p.id,
            title: p.title,
            slug: p.slug,
            location: p.location,
            price: p.price,
            image: p.image,
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
