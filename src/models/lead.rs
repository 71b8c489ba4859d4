use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::lead_entity as leads;

/// Lead fields held alongside a pending code until it is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub purpose: String,
    pub requirements: String,
    pub budget: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SendOtpRequest {
    #[schema(example = "Asha Rao")]
    pub name: Option<String>,
    #[schema(example = "asha@example.com")]
    pub email: Option<String>,
    #[schema(example = "9990001111")]
    pub phone: Option<String>,
    #[schema(example = "Buy")]
    pub purpose: Option<String>,
    #[schema(example = "2BHK near the metro")]
    pub requirements: Option<String>,
    #[schema(example = "80-95L")]
    pub budget: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    #[schema(example = "9990001111")]
    pub phone: String,
    #[schema(example = "482913")]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendOtpResponse {
    pub expires_in: i64,
    pub email_sent: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateLeadRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub purpose: Option<String>,
    pub requirements: Option<String>,
    pub budget: Option<String>,
    pub message: Option<String>,
    pub marked: Option<bool>,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeadResponse {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub purpose: String,
    pub requirements: String,
    pub budget: Option<String>,
    pub message: Option<String>,
    pub marked: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpResponse {
    pub lead: LeadResponse,
    pub admin_notified: bool,
}

impl From<leads::Model> for LeadResponse {
    fn from(lead: leads::Model) -> Self {
        Self {
            id: lead.id,
            name: lead.name,
            phone: lead.phone,
            email: lead.email,
            purpose: lead.purpose,
            requirements: lead.requirements,
            budget: lead.budget,
            message: lead.message,
            marked: lead.marked,
            is_verified: lead.is_verified,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}
