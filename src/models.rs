use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity;

macro_rules! string_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!(
                        "invalid {}: {other:?} (expected one of {})",
                        stringify!($name),
                        Self::ALL.join(", "),
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(CarStatus {
    Available => "AVAILABLE",
    Unavailable => "UNAVAILABLE",
    Sold => "SOLD",
});

string_enum!(BookingStatus {
    Pending => "PENDING",
    Confirmed => "CONFIRMED",
    Completed => "COMPLETED",
    Cancelled => "CANCELLED",
    NoShow => "NO_SHOW",
});

string_enum!(FuelType {
    Petrol => "PETROL",
    Diesel => "DIESEL",
    Electric => "ELECTRIC",
    Hybrid => "HYBRID",
});

string_enum!(Transmission {
    Manual => "MANUAL",
    Automatic => "AUTOMATIC",
});

string_enum!(BodyType {
    Suv => "SUV",
    Sedan => "SEDAN",
    Hatchback => "HATCHBACK",
    Convertible => "CONVERTIBLE",
    Coupe => "COUPE",
    Pickup => "PICKUP",
    Wagon => "WAGON",
});

string_enum!(UserRole {
    User => "USER",
    Admin => "ADMIN",
});

/// Client-safe car representation. Price and mileage are plain numbers
/// regardless of how the store keeps them; timestamps serialize as ISO-8601.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i32,
    pub color: String,
    pub fuel_type: String,
    pub transmission: String,
    pub body_type: String,
    pub seats: Option<i32>,
    pub description: String,
    pub status: String,
    pub featured: bool,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::cars::Model> for Car {
    fn from(model: entity::cars::Model) -> Self {
        Self {
            id: model.id,
            brand: model.brand,
            model: model.model,
            year: model.year,
            price: model.price.to_f64().unwrap_or_default(),
            mileage: model.mileage,
            color: model.color,
            fuel_type: model.fuel_type,
            transmission: model.transmission,
            body_type: model.body_type,
            seats: model.seats,
            description: model.description,
            status: model.status,
            featured: model.featured,
            images: model.images,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub image_url: Option<String>,
}

impl From<entity::users::Model> for UserSummary {
    fn from(model: entity::users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            image_url: model.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestDriveBooking {
    pub id: Uuid,
    pub car_id: Uuid,
    pub user_id: Uuid,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::test_drive_bookings::Model> for TestDriveBooking {
    fn from(model: entity::test_drive_bookings::Model) -> Self {
        Self {
            id: model.id,
            car_id: model.car_id,
            user_id: model.user_id,
            booking_date: model.booking_date,
            start_time: model.start_time,
            end_time: model.end_time,
            status: model.status,
            notes: model.notes,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_car_entity() -> entity::cars::Model {
        entity::cars::Model {
            id: Uuid::new_v4(),
            brand: "Toyota".into(),
            model: "Corolla".into(),
            year: 2021,
            price: Decimal::new(1_899_999, 2),
            mileage: 12_000,
            color: "White".into(),
            fuel_type: "PETROL".into(),
            transmission: "AUTOMATIC".into(),
            body_type: "SEDAN".into(),
            seats: Some(5),
            description: "Clean single-owner sedan".into(),
            status: "AVAILABLE".into(),
            featured: false,
            images: vec!["https://example.test/a.jpg".into()],
            created_at: "2024-03-01T10:00:00Z".parse().unwrap(),
            updated_at: "2024-03-02T10:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn decimal_price_coerces_to_f64() {
        let car = Car::from(sample_car_entity());
        assert_eq!(car.price, 18999.99);
    }

    #[test]
    fn serialization_is_idempotent() {
        let entity = sample_car_entity();
        let first = serde_json::to_string(&Car::from(entity.clone())).unwrap();
        let second = serde_json::to_string(&Car::from(entity)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn timestamps_render_as_iso8601() {
        let car = Car::from(sample_car_entity());
        let json = serde_json::to_value(&car).unwrap();
        assert_eq!(json["createdAt"], "2024-03-01T10:00:00Z");
    }

    #[test]
    fn booking_status_parse_is_closed() {
        assert_eq!(
            "NO_SHOW".parse::<BookingStatus>(),
            Ok(BookingStatus::NoShow)
        );
        assert!("SHIPPED".parse::<BookingStatus>().is_err());
        assert!("pending".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn car_status_round_trips() {
        for text in CarStatus::ALL {
            assert_eq!(text.parse::<CarStatus>().unwrap().as_str(), *text);
        }
    }
}
