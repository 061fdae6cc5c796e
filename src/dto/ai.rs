use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Image payload for AI extraction, as a base64 data URL.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtractCarRequest {
    pub image: String,
}

/// Attributes the vision model reads off a car photo. Price, mileage and
/// year stay loosely typed because the model may return them as strings or
/// numbers; the admin reviews them before they become a listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarDetails {
    pub brand: String,
    pub model: String,
    #[schema(value_type = Object)]
    pub year: serde_json::Value,
    pub color: String,
    #[schema(value_type = Object)]
    pub price: serde_json::Value,
    #[schema(value_type = Object)]
    pub mileage: serde_json::Value,
    pub body_type: String,
    pub fuel_type: String,
    pub transmission: String,
    pub description: String,
    pub confidence: f64,
}
