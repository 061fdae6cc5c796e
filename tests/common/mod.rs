use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_carmarket_api::{
    db::{create_orm_conn, run_migrations},
    entity::{cars, users},
    middleware::auth::AuthUser,
    services::{storage::ObjectStorage, vision::VisionProvider},
    state::AppState,
};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, Statement};
use uuid::Uuid;

#[derive(Default)]
pub struct MockStorage {
    pub uploaded: Mutex<Vec<String>>,
    pub removed: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn upload(
        &self,
        path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> anyhow::Result<String> {
        self.uploaded.lock().unwrap().push(path.to_string());
        Ok(format!(
            "https://mock.test/storage/v1/object/public/car-images/{path}"
        ))
    }

    async fn remove(&self, paths: &[String]) -> anyhow::Result<()> {
        self.removed.lock().unwrap().extend(paths.iter().cloned());
        Ok(())
    }

    fn bucket(&self) -> &str {
        "car-images"
    }
}

pub struct MockVision;

#[async_trait]
impl VisionProvider for MockVision {
    async fn extract(
        &self,
        _image: &[u8],
        _mime_type: &str,
        _prompt: &str,
    ) -> anyhow::Result<String> {
        Ok(r#"```json
{"brand":"Toyota","model":"Corolla","year":2021,"color":"White","price":"18999","mileage":"12000","bodyType":"SEDAN","fuelType":"PETROL","transmission":"AUTOMATIC","description":"Tidy commuter.","confidence":0.9}
```"#
            .to_string())
    }
}

/// Connects, migrates and truncates. Returns `None` (skip) when no database
/// is configured in the environment.
pub async fn setup_state() -> anyhow::Result<Option<(AppState, Arc<MockStorage>)>> {
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(None);
            }
        };

    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE test_drive_bookings, audit_logs, cars, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    let storage = Arc::new(MockStorage::default());
    let state = AppState {
        orm,
        storage: storage.clone(),
        vision: Arc::new(MockVision),
    };
    Ok(Some((state, storage)))
}

pub async fn create_user(
    orm: &DatabaseConnection,
    external_id: &str,
    email: &str,
    role: &str,
) -> anyhow::Result<users::Model> {
    let now = Utc::now();
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        clerk_user_id: Set(external_id.into()),
        email: Set(email.into()),
        name: Set(Some("Test User".into())),
        phone: Set(None),
        image_url: Set(None),
        role: Set(role.into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(orm)
    .await?;
    Ok(user)
}

/// `created_minute` staggers `created_at` so newest-first ordering is
/// deterministic.
pub async fn create_car(
    orm: &DatabaseConnection,
    brand: &str,
    model: &str,
    price: i64,
    status: &str,
    created_minute: u32,
) -> anyhow::Result<cars::Model> {
    let created = Utc
        .with_ymd_and_hms(2024, 5, 1, 12, created_minute, 0)
        .unwrap();
    let car = cars::ActiveModel {
        id: Set(Uuid::new_v4()),
        brand: Set(brand.into()),
        model: Set(model.into()),
        year: Set(2021),
        price: Set(Decimal::new(price, 0)),
        mileage: Set(10_000),
        color: Set("White".into()),
        fuel_type: Set("PETROL".into()),
        transmission: Set("AUTOMATIC".into()),
        body_type: Set("SEDAN".into()),
        seats: Set(Some(5)),
        description: Set("test car".into()),
        status: Set(status.into()),
        featured: Set(false),
        images: Set(vec![format!(
            "https://mock.test/storage/v1/object/public/car-images/cars/{brand}/1.jpg"
        )]),
        created_at: Set(created.into()),
        updated_at: Set(created.into()),
    }
    .insert(orm)
    .await?;
    Ok(car)
}

pub fn auth(external_id: &str) -> AuthUser {
    AuthUser {
        external_id: external_id.into(),
    }
}
