use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::cars::CarList,
    error::AppResult,
    models::Car,
    response::ApiResponse,
    routes::params::CarListQuery,
    services::car_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars))
        .route("/{id}", get(get_car))
}

#[utoipa::path(
    get,
    path = "/api/cars",
    params(
        ("search" = Option<String>, Query, description = "Substring match over brand and model"),
        ("brand" = Option<String>, Query, description = "Exact brand filter"),
        ("bodyType" = Option<String>, Query, description = "Exact body type filter"),
        ("fuelType" = Option<String>, Query, description = "Exact fuel type filter"),
        ("transmission" = Option<String>, Query, description = "Exact transmission filter"),
        ("minPrice" = Option<f64>, Query, description = "Inclusive lower price bound"),
        ("maxPrice" = Option<f64>, Query, description = "Inclusive upper price bound"),
        ("sortBy" = Option<String>, Query, description = "newest (default), priceAsc, priceDesc"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List cars", body = ApiResponse<CarList>)
    ),
    tag = "Cars"
)]
pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<CarListQuery>,
) -> AppResult<Json<ApiResponse<CarList>>> {
    let resp = car_service::list_cars(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/cars/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Get car", body = ApiResponse<Car>),
        (status = 404, description = "Car not found"),
    ),
    tag = "Cars"
)]
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Car>>> {
    let resp = car_service::get_car(&state, id).await?;
    Ok(Json(resp))
}
