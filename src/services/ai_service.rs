use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::{
    dto::ai::{CarDetails, ExtractCarRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, require_admin},
    response::{ApiResponse, Meta},
    state::AppState,
};

const EXTRACTION_PROMPT: &str = r#"Analyze this car image and extract the following information:
1. Brand (manufacturer)
2. Model
3. Year (approximately)
4. Color
5. Body type (SUV, Sedan, Hatchback, Convertible, Coupe, Pickup, Wagon etc.)
6. Mileage
7. Fuel type (your best guess)
8. Transmission type (your best guess)
9. Price (your best guess in US dollars)
10. Short description as to be added to a car listing

Format your response as a clean JSON object with these fields:
{
  "brand": "",
  "model": "",
  "year": 0000,
  "color": "",
  "price": "",
  "mileage": "",
  "bodyType": "",
  "fuelType": "",
  "transmission": "",
  "description": "",
  "confidence": 0.0
}

For confidence, provide a value between 0 and 1 representing how confident you are in your overall identification.
Only respond with the JSON object, nothing else."#;

const REQUIRED_FIELDS: [&str; 11] = [
    "brand",
    "model",
    "year",
    "color",
    "price",
    "mileage",
    "bodyType",
    "fuelType",
    "transmission",
    "description",
    "confidence",
];

/// Run the vision model over a car photo and parse its answer into listing
/// attributes. The model is asked for bare JSON but tends to wrap it in a
/// Markdown code fence, so that is stripped before parsing.
pub async fn extract_car_details(
    state: &AppState,
    user: &AuthUser,
    payload: ExtractCarRequest,
) -> AppResult<ApiResponse<CarDetails>> {
    require_admin(state, user).await?;

    let (mime_type, image) = decode_image(&payload.image)?;

    let text = state
        .vision
        .extract(&image, &mime_type, EXTRACTION_PROMPT)
        .await
        .map_err(|err| AppError::Upstream(format!("AI extraction failed: {err}")))?;

    let details = parse_details(&text)?;

    Ok(ApiResponse::success(
        "Car details extracted",
        details,
        Some(Meta::empty()),
    ))
}

fn decode_image(data_url: &str) -> AppResult<(String, Vec<u8>)> {
    let rest = data_url
        .strip_prefix("data:image/")
        .ok_or_else(|| AppError::BadRequest("image must be a base64 data URL".into()))?;
    let (extension, encoded) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::BadRequest("image must be base64 encoded".into()))?;
    let bytes = BASE64
        .decode(encoded)
        .map_err(|err| AppError::BadRequest(format!("invalid base64 image data: {err}")))?;
    Ok((format!("image/{extension}"), bytes))
}

fn parse_details(text: &str) -> AppResult<CarDetails> {
    let cleaned = strip_code_fences(text);

    let value: serde_json::Value = serde_json::from_str(&cleaned)
        .map_err(|_| AppError::Upstream("failed to parse AI response as JSON".into()))?;

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| value.get(field).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Upstream(format!(
            "AI response missing required fields: {}",
            missing.join(", ")
        )));
    }

    serde_json::from_value(value)
        .map_err(|err| AppError::Upstream(format!("malformed AI response: {err}")))
}

/// Drop Markdown code fences (``` or ```json) around the model output.
fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in text.split("```") {
        let segment = segment.strip_prefix("json").unwrap_or(segment);
        out.push_str(segment);
    }
    out.trim().to_string()
}
