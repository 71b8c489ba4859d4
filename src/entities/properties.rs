use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_name = "type", column_type = "Text")]
    pub property_type: String,
    pub purpose: String,
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub brochure: String,
    #[sea_orm(column_type = "Text")]
    pub builder: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub images: Json,
    pub price: Option<f64>,
    #[sea_orm(column_type = "Text")]
    pub bedrooms: String,
    #[sea_orm(column_type = "Text")]
    pub bathrooms: String,
    #[sea_orm(column_type = "Text")]
    pub area_sqft: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub highlights: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub features_amenities: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub nearby: Json,
    #[sea_orm(column_type = "Text")]
    pub google_map_url: String,
    #[sea_orm(column_type = "Text")]
    pub video_link: String,
    #[sea_orm(column_type = "Text")]
    pub meta_title: String,
    #[sea_orm(column_type = "Text")]
    pub meta_description: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
