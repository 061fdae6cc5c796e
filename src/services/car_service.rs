use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::cars::{AddCarRequest, CarList, UpdateCarStatusRequest},
    entity::cars::{ActiveModel, Column, Entity as Cars},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, require_admin},
    models::{BodyType, Car, CarStatus, FuelType, Transmission},
    response::{ApiResponse, Meta},
    routes::params::{AdminCarQuery, CarListQuery, CarSortBy},
    services::storage::object_paths_from_urls,
    state::AppState,
};

/// Public listing: closed filter set, optional sort, paginated.
pub async fn list_cars(state: &AppState, query: CarListQuery) -> AppResult<ApiResponse<CarList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Brand).ilike(pattern.clone()))
                .add(Expr::col(Column::Model).ilike(pattern)),
        );
    }

    if let Some(brand) = query.brand.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Brand.eq(brand.clone()));
    }
    if let Some(body_type) = query.body_type.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::BodyType.eq(body_type.clone()));
    }
    if let Some(fuel_type) = query.fuel_type.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::FuelType.eq(fuel_type.clone()));
    }
    if let Some(transmission) = query.transmission.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Transmission.eq(transmission.clone()));
    }
    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    let finder = Cars::find().filter(condition);
    // Creation time is the stable tiebreak under every sort key.
    let finder = match CarSortBy::from_param(query.sort_by.as_deref()) {
        CarSortBy::Newest => finder.order_by_desc(Column::CreatedAt),
        CarSortBy::PriceAsc => finder
            .order_by_asc(Column::Price)
            .order_by_desc(Column::CreatedAt),
        CarSortBy::PriceDesc => finder
            .order_by_desc(Column::Price)
            .order_by_desc(Column::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Car::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Cars", CarList { items }, Some(meta)))
}

pub async fn get_car(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Car>> {
    let car = Cars::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Car::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Car", car, None))
}

/// Admin inventory search over brand, model and color.
pub async fn list_cars_admin(
    state: &AppState,
    user: &AuthUser,
    query: AdminCarQuery,
) -> AppResult<ApiResponse<CarList>> {
    require_admin(state, user).await?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Brand).ilike(pattern.clone()))
                .add(Expr::col(Column::Model).ilike(pattern.clone()))
                .add(Expr::col(Column::Color).ilike(pattern)),
        );
    }

    let finder = Cars::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Car::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Cars", CarList { items }, Some(meta)))
}

pub async fn add_car(
    state: &AppState,
    user: &AuthUser,
    payload: AddCarRequest,
) -> AppResult<ApiResponse<Car>> {
    let admin = require_admin(state, user).await?;
    let data = payload.car_data;

    let status = match data.status.as_deref() {
        Some(s) => s
            .parse::<CarStatus>()
            .map_err(AppError::BadRequest)?,
        None => CarStatus::Available,
    };
    let fuel_type = data
        .fuel_type
        .parse::<FuelType>()
        .map_err(AppError::BadRequest)?;
    let transmission = data
        .transmission
        .parse::<Transmission>()
        .map_err(AppError::BadRequest)?;
    let body_type = data
        .body_type
        .parse::<BodyType>()
        .map_err(AppError::BadRequest)?;

    // Images are uploaded before the row is inserted; a failed insert leaves
    // the uploaded files behind. Accepted, see DESIGN.md.
    let car_id = Uuid::new_v4();
    let image_urls = upload_images(state, car_id, &payload.images).await?;
    if image_urls.is_empty() {
        return Err(AppError::BadRequest("No valid images were uploaded".into()));
    }

    let now = Utc::now();
    let active = ActiveModel {
        id: Set(car_id),
        brand: Set(data.brand),
        model: Set(data.model),
        year: Set(data.year),
        price: Set(data.price),
        mileage: Set(data.mileage),
        color: Set(data.color),
        fuel_type: Set(fuel_type.as_str().to_string()),
        transmission: Set(transmission.as_str().to_string()),
        body_type: Set(body_type.as_str().to_string()),
        seats: Set(data.seats),
        description: Set(data.description),
        status: Set(status.as_str().to_string()),
        featured: Set(data.featured.unwrap_or(false)),
        images: Set(image_urls),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    let car = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        state,
        Some(admin.id),
        "car_create",
        Some("cars"),
        Some(serde_json::json!({ "car_id": car.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Car created",
        Car::from(car),
        Some(Meta::empty()),
    ))
}

pub async fn update_car_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCarStatusRequest,
) -> AppResult<ApiResponse<Car>> {
    let admin = require_admin(state, user).await?;

    let existing = Cars::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(status) = payload.status.as_deref() {
        let status = status.parse::<CarStatus>().map_err(AppError::BadRequest)?;
        active.status = Set(status.as_str().to_string());
    }
    if let Some(featured) = payload.featured {
        active.featured = Set(featured);
    }
    active.updated_at = Set(Utc::now().into());
    let car = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        state,
        Some(admin.id),
        "car_status_update",
        Some("cars"),
        Some(serde_json::json!({ "car_id": car.id, "status": car.status, "featured": car.featured })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Car updated",
        Car::from(car),
        Some(Meta::empty()),
    ))
}

pub async fn delete_car(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let admin = require_admin(state, user).await?;

    let car = Cars::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Cars::delete_by_id(id).exec(&state.orm).await?;

    // Stored images go next; a storage failure must not undo the delete.
    let paths = object_paths_from_urls(&car.images, state.storage.bucket());
    if !paths.is_empty() {
        if let Err(err) = state.storage.remove(&paths).await {
            tracing::warn!(error = %err, car_id = %id, "failed to delete car images");
        }
    }

    if let Err(err) = log_audit(
        state,
        Some(admin.id),
        "car_delete",
        Some("cars"),
        Some(serde_json::json!({ "car_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Decode base64 data URLs and push them to object storage under
/// `cars/{car_id}/`. Invalid entries are skipped, not fatal.
async fn upload_images(
    state: &AppState,
    car_id: Uuid,
    images: &[String],
) -> AppResult<Vec<String>> {
    let mut urls = Vec::new();

    for (index, data_url) in images.iter().enumerate() {
        let Some((extension, encoded)) = split_data_url(data_url) else {
            tracing::warn!(index, "skipping invalid image data");
            continue;
        };

        let bytes = match BASE64.decode(encoded) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping undecodable image data");
                continue;
            }
        };

        let path = format!(
            "cars/{car_id}/image-{}-{index}.{extension}",
            Utc::now().timestamp_millis()
        );
        let content_type = format!("image/{extension}");

        let url = state
            .storage
            .upload(&path, bytes, &content_type)
            .await
            .map_err(|err| AppError::Upstream(format!("failed to upload image: {err}")))?;
        urls.push(url);
    }

    Ok(urls)
}

/// Split `data:image/<ext>;base64,<payload>` into extension and payload.
fn split_data_url(data_url: &str) -> Option<(&str, &str)> {
    let rest = data_url.strip_prefix("data:image/")?;
    let (extension, rest) = rest.split_once(";base64,")?;
    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some((extension, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_well_formed_data_urls() {
        let (ext, payload) = split_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(ext, "png");
        assert_eq!(payload, "aGVsbG8=");
    }

    #[test]
    fn rejects_non_image_data_urls() {
        assert!(split_data_url("data:text/plain;base64,aGVsbG8=").is_none());
        assert!(split_data_url("https://example.test/image.png").is_none());
        assert!(split_data_url("data:image/;base64,aGVsbG8=").is_none());
    }
}
