use axum_carmarket_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{cars, users},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let admin_id = ensure_admin(&orm, "admin@example.com").await?;
    seed_cars(&orm).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_admin(orm: &DatabaseConnection, email: &str) -> anyhow::Result<Uuid> {
    if let Some(existing) = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }

    let now = Utc::now();
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        clerk_user_id: Set("seed-admin".into()),
        email: Set(email.to_string()),
        name: Set(Some("Seed Admin".into())),
        phone: Set(None),
        image_url: Set(None),
        role: Set("ADMIN".into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(orm)
    .await?;

    Ok(user.id)
}

async fn seed_cars(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let samples: [(&str, &str, i32, i64, i32, &str, &str, &str, &str); 3] = [
        (
            "Toyota",
            "Corolla",
            2021,
            18_999,
            12_000,
            "White",
            "PETROL",
            "AUTOMATIC",
            "SEDAN",
        ),
        (
            "Honda",
            "Civic",
            2020,
            21_500,
            30_500,
            "Blue",
            "PETROL",
            "MANUAL",
            "SEDAN",
        ),
        (
            "Tesla",
            "Model Y",
            2023,
            46_990,
            5_200,
            "Black",
            "ELECTRIC",
            "AUTOMATIC",
            "SUV",
        ),
    ];

    for (brand, model, year, price, mileage, color, fuel, transmission, body) in samples {
        let exists = cars::Entity::find()
            .filter(cars::Column::Brand.eq(brand))
            .filter(cars::Column::Model.eq(model))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }

        let now = Utc::now();
        cars::ActiveModel {
            id: Set(Uuid::new_v4()),
            brand: Set(brand.into()),
            model: Set(model.into()),
            year: Set(year),
            price: Set(Decimal::new(price, 0)),
            mileage: Set(mileage),
            color: Set(color.into()),
            fuel_type: Set(fuel.into()),
            transmission: Set(transmission.into()),
            body_type: Set(body.into()),
            seats: Set(Some(5)),
            description: Set(format!("{year} {brand} {model} in {color}")),
            status: Set("AVAILABLE".into()),
            featured: Set(false),
            images: Set(vec![]),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(orm)
        .await?;
    }

    Ok(())
}
