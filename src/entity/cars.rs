use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
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
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::test_drive_bookings::Entity")]
    TestDriveBookings,
}

impl Related<super::test_drive_bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestDriveBookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
