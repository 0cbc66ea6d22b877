use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    /// Cost in hundredths, so `1.50` is stored as `150`.
    #[sea_orm(column_name = "cost")]
    pub cost_cents: i64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Relative path inside the image store, e.g. `uploads/products/<name>`.
    #[sea_orm(column_type = "Text", nullable)]
    pub product_image: Option<String>,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn cost(&self) -> rust_decimal::Decimal {
        rust_decimal::Decimal::new(self.cost_cents, 2)
    }
}
