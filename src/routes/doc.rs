use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        ai::{CarDetails, ExtractCarRequest},
        bookings::{AdminBooking, BookingList, UpdateBookingStatusRequest},
        cars::{AddCarRequest, CarList, CreateCarData, UpdateCarStatusRequest},
        dashboard::{CarCounts, DashboardData, TestDriveCounts},
    },
    models::{Car, TestDriveBooking, UserSummary},
    response::{ApiResponse, Meta},
    routes::{admin, cars as car_routes, health, health::HealthData, params},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        car_routes::list_cars,
        car_routes::get_car,
        admin::list_cars_admin,
        admin::add_car,
        admin::extract_car_details,
        admin::delete_car,
        admin::update_car_status,
        admin::list_bookings,
        admin::update_booking_status,
        admin::get_dashboard
    ),
    components(
        schemas(
            Car,
            TestDriveBooking,
            UserSummary,
            CarList,
            CreateCarData,
            AddCarRequest,
            UpdateCarStatusRequest,
            AdminBooking,
            BookingList,
            UpdateBookingStatusRequest,
            CarDetails,
            ExtractCarRequest,
            CarCounts,
            TestDriveCounts,
            DashboardData,
            params::CarListQuery,
            params::AdminCarQuery,
            params::BookingListQuery,
            Meta,
            HealthData,
            ApiResponse<HealthData>,
            ApiResponse<Car>,
            ApiResponse<CarList>,
            ApiResponse<BookingList>,
            ApiResponse<TestDriveBooking>,
            ApiResponse<CarDetails>,
            ApiResponse<DashboardData>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Cars", description = "Public car listing endpoints"),
        (name = "Admin", description = "Inventory, test drive and dashboard administration"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
