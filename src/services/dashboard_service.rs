use std::collections::HashSet;

use sea_orm::{EntityTrait, FromQueryResult, QuerySelect};
use uuid::Uuid;

use crate::{
    dto::dashboard::{CarCounts, DashboardData, TestDriveCounts},
    entity::{cars, test_drive_bookings},
    error::AppResult,
    middleware::auth::{AuthUser, require_admin},
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, FromQueryResult)]
pub struct CarStat {
    pub id: Uuid,
    pub status: String,
    pub featured: bool,
}

#[derive(Debug, FromQueryResult)]
pub struct BookingStat {
    pub car_id: Uuid,
    pub status: String,
}

pub async fn get_dashboard(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<DashboardData>> {
    require_admin(state, user).await?;

    // Both collections are small; pull minimal projections and aggregate in
    // memory, since the conversion metric needs a cross-entity membership
    // check that a single SQL aggregate would not express cleanly.
    let car_stats = cars::Entity::find()
        .select_only()
        .column(cars::Column::Id)
        .column(cars::Column::Status)
        .column(cars::Column::Featured)
        .into_model::<CarStat>()
        .all(&state.orm)
        .await?;

    let booking_stats = test_drive_bookings::Entity::find()
        .select_only()
        .column(test_drive_bookings::Column::CarId)
        .column(test_drive_bookings::Column::Status)
        .into_model::<BookingStat>()
        .all(&state.orm)
        .await?;

    let data = compute_dashboard(&car_stats, &booking_stats);
    Ok(ApiResponse::success("Dashboard", data, Some(Meta::empty())))
}

/// One pass over each collection. Conversion rate: sold cars that had at
/// least one completed test drive, per completed test drive, as a percentage
/// rounded to two decimals; exactly 0 when nothing completed.
pub fn compute_dashboard(cars: &[CarStat], bookings: &[BookingStat]) -> DashboardData {
    let mut car_counts = CarCounts::default();
    for car in cars {
        car_counts.total += 1;
        match car.status.as_str() {
            "AVAILABLE" => car_counts.available += 1,
            "SOLD" => car_counts.sold += 1,
            "UNAVAILABLE" => car_counts.unavailable += 1,
            _ => {}
        }
        if car.featured {
            car_counts.featured += 1;
        }
    }

    let mut td = TestDriveCounts::default();
    let mut completed_car_ids: HashSet<Uuid> = HashSet::new();
    for booking in bookings {
        td.total += 1;
        match booking.status.as_str() {
            "PENDING" => td.pending += 1,
            "CONFIRMED" => td.confirmed += 1,
            "COMPLETED" => {
                td.completed += 1;
                completed_car_ids.insert(booking.car_id);
            }
            "CANCELLED" => td.cancelled += 1,
            "NO_SHOW" => td.no_show += 1,
            _ => {}
        }
    }

    let sold_after_test_drive = cars
        .iter()
        .filter(|car| car.status == "SOLD" && completed_car_ids.contains(&car.id))
        .count() as i64;

    td.conversion_rate = if td.completed > 0 {
        let rate = sold_after_test_drive as f64 / td.completed as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    } else {
        0.0
    };

    DashboardData {
        cars: car_counts,
        test_drives: td,
    }
}
