use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Car;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarData {
    pub brand: String,
    pub model: String,
    pub year: i32,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub mileage: i32,
    pub color: String,
    pub fuel_type: String,
    pub transmission: String,
    pub body_type: String,
    pub seats: Option<i32>,
    pub description: String,
    pub status: Option<String>,
    pub featured: Option<bool>,
}

/// `images` are base64 data URLs (`data:image/<ext>;base64,...`); entries
/// that do not look like image data are skipped with a warning.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCarRequest {
    pub car_data: CreateCarData,
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCarStatusRequest {
    pub status: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CarList {
    pub items: Vec<Car>,
}
