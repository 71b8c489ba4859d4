use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::property_entity as properties;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PropertyPurpose {
    Buy,
    Rent,
    Lease,
}

impl std::fmt::Display for PropertyPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyPurpose::Buy => write!(f, "Buy"),
            PropertyPurpose::Rent => write!(f, "Rent"),
            PropertyPurpose::Lease => write!(f, "Lease"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreatePropertyRequest {
    #[schema(example = "Sea View 3BHK, Andheri")]
    pub title: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "apartment")]
    pub property_type: Option<String>,
    pub description: Option<String>,
    pub purpose: Option<PropertyPurpose>,
    #[schema(example = "Andheri West, Mumbai")]
    pub location: Option<String>,
    pub price: Option<f64>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub area_sqft: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub features_amenities: Vec<String>,
    #[serde(default)]
    pub nearby: Vec<String>,
    pub google_map_url: Option<String>,
    pub video_link: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub brochure: Option<String>,
    pub builder: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

/// Every field is optional; `existing_images` replaces the kept list and
/// `images` are appended after it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub description: Option<String>,
    pub purpose: Option<PropertyPurpose>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub area_sqft: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub features_amenities: Option<Vec<String>>,
    pub nearby: Option<Vec<String>>,
    pub google_map_url: Option<String>,
    pub video_link: Option<String>,
    pub existing_images: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub brochure: Option<String>,
    pub builder: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PropertyQuery {
    /// Property type; `-` matches a space, `all` disables the filter.
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    /// Comma separated list of locations, OR-ed together.
    pub location: Option<String>,
    pub purpose: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PropertyResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub purpose: String,
    pub location: String,
    pub price: Option<f64>,
    pub bedrooms: String,
    pub bathrooms: String,
    pub area_sqft: String,
    pub highlights: Vec<String>,
    pub features_amenities: Vec<String>,
    pub nearby: Vec<String>,
    pub google_map_url: String,
    pub video_link: String,
    pub images: Vec<String>,
    pub brochure: String,
    pub builder: String,
    pub meta_title: String,
    pub meta_description: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

pub(crate) fn string_list(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

impl From<properties::Model> for PropertyResponse {
    fn from(p: properties::Model) -> Self {
        Self {
            id: p.id,
            highlights: string_list(&p.highlights),
            features_amenities: string_list(&p.features_amenities),
            nearby: string_list(&p.nearby),
            images: string_list(&p.images),
            title: p.title,
            slug: p.slug,
            description: p.description,
            property_type: p.property_type,
            purpose: p.purpose,
            location: p.location,
            price: p.price,
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            area_sqft: p.area_sqft,
            google_map_url: p.google_map_url,
            video_link: p.video_link,
            brochure: p.brochure,
            builder: p.builder,
            meta_title: p.meta_title,
            meta_description: p.meta_description,
            created_at: p.created_at,
            last_updated: p.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_list_skips_non_strings() {
        assert_eq!(
            string_list(&json!(["pool", 3, "gym", null])),
            vec!["pool".to_string(), "gym".to_string()]
        );
        assert!(string_list(&json!({"not": "a list"})).is_empty());
    }

    #[test]
    fn test_purpose_round_trips_through_json() {
        let req: CreatePropertyRequest =
            serde_json::from_value(json!({"title": "Villa", "purpose": "Lease", "type": "villa"}))
                .unwrap();
        assert_eq!(req.purpose, Some(PropertyPurpose::Lease));
        assert_eq!(req.property_type.as_deref(), Some("villa"));
        assert_eq!(PropertyPurpose::Lease.to_string(), "Lease");
    }
}
