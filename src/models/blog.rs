use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::blog_entity as blogs;
use crate::models::string_list;

/// Cover images are uploaded to storage by the client; only the URL is sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateBlogRequest {
    #[schema(example = "Buying Your First Home in Pune")]
    pub title: Option<String>,
    #[schema(example = "buying-your-first-home-in-pune")]
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    #[schema(example = "Oaklyn Editorial")]
    pub author: Option<String>,
    /// Comma separated.
    #[schema(example = "pune, first home, loans")]
    pub tags: Option<String>,
    #[schema(example = "https://files.oaklyn.test/blogs/cover.jpg")]
    pub cover_image: Option<String>,
    pub cover_image_alt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    /// Comma separated; replaces the whole tag list.
    pub tags: Option<String>,
    pub cover_image: Option<String>,
    pub cover_image_alt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCoverImageRequest {
    #[schema(example = "https://files.oaklyn.test/blogs/new-cover.jpg")]
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlogResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub cover_image: String,
    pub cover_image_alt: String,
    pub date_published: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// "pune, , loans " -> ["pune", "loans"]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl From<blogs::Model> for BlogResponse {
    fn from(b: blogs::Model) -> Self {
        Self {
            id: b.id,
            tags: string_list(&b.tags),
            title: b.title,
            slug: b.slug,
            excerpt: b.excerpt,
            content: b.content,
            author: b.author,
            cover_image: b.cover_image,
            cover_image_alt: b.cover_image_alt,
            date_published: b.date_published,
            last_updated: b.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("pune, , loans "), vec!["pune", "loans"]);
        assert!(parse_tags(" , ").is_empty());
    }
}
