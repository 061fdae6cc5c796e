use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        ai::{CarDetails, ExtractCarRequest},
        bookings::{BookingList, UpdateBookingStatusRequest},
        cars::{AddCarRequest, CarList, UpdateCarStatusRequest},
        dashboard::DashboardData,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Car, TestDriveBooking},
    response::ApiResponse,
    routes::params::{AdminCarQuery, BookingListQuery},
    services::{ai_service, booking_service, car_service, dashboard_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars_admin))
        .route("/cars", post(add_car))
        .route("/cars/extract", post(extract_car_details))
        .route("/cars/{id}", delete(delete_car))
        .route("/cars/{id}/status", patch(update_car_status))
        .route("/test-drives", get(list_bookings))
        .route("/test-drives/{id}/status", patch(update_booking_status))
        .route("/dashboard", get(get_dashboard))
}

#[utoipa::path(
    get,
    path = "/api/admin/cars",
    params(
        ("search" = Option<String>, Query, description = "Substring match over brand, model and color"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "Search inventory (admin only)", body = ApiResponse<CarList>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_cars_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AdminCarQuery>,
) -> AppResult<Json<ApiResponse<CarList>>> {
    let resp = car_service::list_cars_admin(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/cars",
    request_body = AddCarRequest,
    responses(
        (status = 200, description = "Create a listing with uploaded images", body = ApiResponse<Car>),
        (status = 400, description = "Invalid car data or no valid images"),
        (status = 403, description = "Forbidden"),
        (status = 502, description = "Image upload failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn add_car(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddCarRequest>,
) -> AppResult<Json<ApiResponse<Car>>> {
    let resp = car_service::add_car(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/cars/extract",
    request_body = ExtractCarRequest,
    responses(
        (status = 200, description = "Extract listing attributes from a car photo", body = ApiResponse<CarDetails>),
        (status = 400, description = "Invalid image payload"),
        (status = 403, description = "Forbidden"),
        (status = 502, description = "AI extraction failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn extract_car_details(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ExtractCarRequest>,
) -> AppResult<Json<ApiResponse<CarDetails>>> {
    let resp = ai_service::extract_car_details(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/cars/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Delete a listing and its stored images"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_car(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = car_service::delete_car(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/cars/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    request_body = UpdateCarStatusRequest,
    responses(
        (status = 200, description = "Update status and/or featured flag", body = ApiResponse<Car>),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_car_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCarStatusRequest>,
) -> AppResult<Json<ApiResponse<Car>>> {
    let resp = car_service::update_car_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/test-drives",
    params(
        ("search" = Option<String>, Query, description = "Substring match over car brand/model and user name/email"),
        ("status" = Option<String>, Query, description = "Filter by booking status"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List test drive bookings", body = ApiResponse<BookingList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<ApiResponse<BookingList>>> {
    let resp = booking_service::list_bookings(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/test-drives/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Update booking status", body = ApiResponse<TestDriveBooking>),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_booking_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> AppResult<Json<ApiResponse<TestDriveBooking>>> {
    let resp = booking_service::update_booking_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Inventory and test drive aggregates", body = ApiResponse<DashboardData>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DashboardData>>> {
    let resp = dashboard_service::get_dashboard(&state, &user).await?;
    Ok(Json(resp))
}
