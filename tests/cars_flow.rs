mod common;

use axum_carmarket_api::{
    dto::{
        ai::ExtractCarRequest,
        cars::{AddCarRequest, CreateCarData, UpdateCarStatusRequest},
    },
    entity::cars,
    error::AppError,
    routes::params::{AdminCarQuery, CarListQuery},
    services::{ai_service, car_service, dashboard_service},
};
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use uuid::Uuid;

use common::{auth, create_car, create_user, setup_state};

// Inventory flow: public browsing with filters and pagination, then the
// admin side: create with image upload, status update, AI extraction, delete.
#[tokio::test]
async fn browse_and_manage_inventory_flow() -> anyhow::Result<()> {
    let Some((state, storage)) = setup_state().await? else {
        return Ok(());
    };

    create_user(&state.orm, "admin-1", "admin@example.com", "ADMIN").await?;
    create_user(&state.orm, "user-1", "user@example.com", "USER").await?;
    let admin = auth("admin-1");

    create_car(&state.orm, "Toyota", "Corolla", 18_999, "AVAILABLE", 0).await?;
    create_car(&state.orm, "Honda", "Civic", 21_500, "AVAILABLE", 1).await?;
    create_car(&state.orm, "Tesla", "Model Y", 46_990, "AVAILABLE", 2).await?;

    // No filters: everything, newest first.
    let all = car_service::list_cars(&state, CarListQuery::default()).await?;
    let items = all.data.unwrap().items;
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].brand, "Tesla");
    assert_eq!(items[2].brand, "Toyota");
    assert_eq!(all.meta.unwrap().total, Some(3));

    // Case-insensitive substring search.
    let query = CarListQuery {
        search: Some("toyota".into()),
        ..Default::default()
    };
    let found = car_service::list_cars(&state, query).await?.data.unwrap();
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].brand, "Toyota");

    // Inverted price bounds: empty result, not an error.
    let query = CarListQuery {
        min_price: Some(Decimal::new(30_000, 0)),
        max_price: Some(Decimal::new(20_000, 0)),
        ..Default::default()
    };
    let empty = car_service::list_cars(&state, query).await?.data.unwrap();
    assert!(empty.items.is_empty());

    // Price ascending.
    let query = CarListQuery {
        sort_by: Some("priceAsc".into()),
        ..Default::default()
    };
    let sorted = car_service::list_cars(&state, query).await?.data.unwrap();
    let prices: Vec<f64> = sorted.items.iter().map(|c| c.price).collect();
    assert_eq!(prices, vec![18_999.0, 21_500.0, 46_990.0]);

    // Unknown sort token falls back to newest-first.
    let query = CarListQuery {
        sort_by: Some("mileage".into()),
        ..Default::default()
    };
    let fallback = car_service::list_cars(&state, query).await?.data.unwrap();
    assert_eq!(fallback.items[0].brand, "Tesla");

    // Page 2 of 2-per-page, newest first: third newest leads.
    let query = CarListQuery {
        page: Some(2),
        per_page: Some(2),
        ..Default::default()
    };
    let page = car_service::list_cars(&state, query).await?;
    assert_eq!(page.meta.unwrap().total, Some(3));
    let items = page.data.unwrap().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].brand, "Toyota");

    // Admin-only surfaces reject non-admins and unknown callers.
    let err = car_service::list_cars_admin(&state, &auth("user-1"), AdminCarQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    let err = dashboard_service::get_dashboard(&state, &auth("nobody"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    // Create a listing. The second image entry is junk and must be skipped,
    // not fatal.
    let request = AddCarRequest {
        car_data: CreateCarData {
            brand: "Mazda".into(),
            model: "3".into(),
            year: 2022,
            price: Decimal::new(24_000, 0),
            mileage: 8_000,
            color: "Red".into(),
            fuel_type: "PETROL".into(),
            transmission: "MANUAL".into(),
            body_type: "HATCHBACK".into(),
            seats: Some(5),
            description: "Sporty hatch".into(),
            status: None,
            featured: Some(true),
        },
        images: vec![
            "data:image/png;base64,aGVsbG8=".into(),
            "not-a-data-url".into(),
        ],
    };
    let created = car_service::add_car(&state, &admin, request)
        .await?
        .data
        .unwrap();
    assert_eq!(created.status, "AVAILABLE");
    assert!(created.featured);
    assert_eq!(created.images.len(), 1);
    assert_eq!(storage.uploaded.lock().unwrap().len(), 1);

    // Status / featured update.
    let updated = car_service::update_car_status(
        &state,
        &admin,
        created.id,
        UpdateCarStatusRequest {
            status: Some("SOLD".into()),
            featured: Some(false),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.status, "SOLD");
    assert!(!updated.featured);

    // Unknown status is declined.
    let err = car_service::update_car_status(
        &state,
        &admin,
        created.id,
        UpdateCarStatusRequest {
            status: Some("SCRAPPED".into()),
            featured: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // AI extraction parses the model's fenced JSON answer.
    let details = ai_service::extract_car_details(
        &state,
        &admin,
        ExtractCarRequest {
            image: "data:image/jpeg;base64,aGVsbG8=".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(details.brand, "Toyota");
    assert_eq!(details.body_type, "SEDAN");
    assert_eq!(details.confidence, 0.9);

    // Delete removes the row and its stored images.
    car_service::delete_car(&state, &admin, created.id).await?;
    assert!(
        cars::Entity::find_by_id(created.id)
            .one(&state.orm)
            .await?
            .is_none()
    );
    let removed = storage.removed.lock().unwrap().clone();
    assert_eq!(removed.len(), 1);
    assert!(removed[0].starts_with(&format!("cars/{}/", created.id)));

    // Deleting a missing id is NotFound and must not touch storage.
    let before = storage.removed.lock().unwrap().len();
    let err = car_service::delete_car(&state, &admin, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    assert_eq!(storage.removed.lock().unwrap().len(), before);

    Ok(())
}
