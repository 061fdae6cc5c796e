use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::bookings::{AdminBooking, BookingList, UpdateBookingStatusRequest},
    entity::{
        cars,
        test_drive_bookings::{ActiveModel, Column, Entity as Bookings, Model as BookingModel},
        users,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, require_admin},
    models::{BookingStatus, Car, TestDriveBooking, UserSummary},
    response::{ApiResponse, Meta},
    routes::params::BookingListQuery,
    state::AppState,
};

/// Admin booking list. Free-text search runs over the related car's
/// brand/model and the related user's name/email; the status filter is
/// exact-match. Results order by booking date (newest first), then start
/// time.
pub async fn list_bookings(
    state: &AppState,
    user: &AuthUser,
    query: BookingListQuery,
) -> AppResult<ApiResponse<BookingList>> {
    require_admin(state, user).await?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Status.eq(status.clone()));
    }

    let mut finder = Bookings::find();

    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        // Both relations are many-to-one, so the joins cannot duplicate rows.
        finder = finder
            .join(
                JoinType::InnerJoin,
                crate::entity::test_drive_bookings::Relation::Cars.def(),
            )
            .join(
                JoinType::InnerJoin,
                crate::entity::test_drive_bookings::Relation::Users.def(),
            );
        condition = condition.add(
            Condition::any()
                .add(Expr::col((cars::Entity, cars::Column::Brand)).ilike(pattern.clone()))
                .add(Expr::col((cars::Entity, cars::Column::Model)).ilike(pattern.clone()))
                .add(Expr::col((users::Entity, users::Column::Name)).ilike(pattern.clone()))
                .add(Expr::col((users::Entity, users::Column::Email)).ilike(pattern)),
        );
    }

    let finder = finder
        .filter(condition)
        .order_by_desc(Column::BookingDate)
        .order_by_asc(Column::StartTime);

    let total = finder.clone().count(&state.orm).await? as i64;

    let bookings = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let items = resolve_relations(state, bookings).await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Test drives",
        BookingList { items },
        Some(meta),
    ))
}

/// Status gate: the booking must exist and the requested status must be one
/// of the five known values. Any valid status is reachable from any other;
/// there is deliberately no transition graph.
pub async fn update_booking_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateBookingStatusRequest,
) -> AppResult<ApiResponse<TestDriveBooking>> {
    let admin = require_admin(state, user).await?;

    let existing = Bookings::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let status = payload
        .status
        .parse::<BookingStatus>()
        .map_err(AppError::BadRequest)?;

    let mut active: ActiveModel = existing.into();
    active.status = Set(status.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    let booking = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        state,
        Some(admin.id),
        "booking_status_update",
        Some("test_drive_bookings"),
        Some(serde_json::json!({ "booking_id": booking.id, "status": booking.status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Test drive status updated",
        TestDriveBooking::from(booking),
        Some(Meta::empty()),
    ))
}

/// Batch-resolve the car and user each booking references.
async fn resolve_relations(
    state: &AppState,
    bookings: Vec<BookingModel>,
) -> AppResult<Vec<AdminBooking>> {
    let car_ids: Vec<Uuid> = bookings.iter().map(|b| b.car_id).collect();
    let user_ids: Vec<Uuid> = bookings.iter().map(|b| b.user_id).collect();

    let cars_by_id: HashMap<Uuid, Car> = cars::Entity::find()
        .filter(cars::Column::Id.is_in(car_ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| (c.id, Car::from(c)))
        .collect();

    let users_by_id: HashMap<Uuid, UserSummary> = users::Entity::find()
        .filter(users::Column::Id.is_in(user_ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|u| (u.id, UserSummary::from(u)))
        .collect();

    let mut items = Vec::with_capacity(bookings.len());
    for booking in bookings {
        let car = cars_by_id
            .get(&booking.car_id)
            .cloned()
            .ok_or(AppError::NotFound)?;
        let user = users_by_id
            .get(&booking.user_id)
            .cloned()
            .ok_or(AppError::NotFound)?;
        items.push(AdminBooking {
            id: booking.id,
            car_id: booking.car_id,
            car,
            user_id: booking.user_id,
            user,
            booking_date: booking.booking_date,
            start_time: booking.start_time,
            end_time: booking.end_time,
            status: booking.status,
            notes: booking.notes,
            created_at: booking.created_at.with_timezone(&Utc),
            updated_at: booking.updated_at.with_timezone(&Utc),
        });
    }

    Ok(items)
}
