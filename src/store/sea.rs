use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Unchanged, DatabaseConnection, DbErr,
    EntityTrait, QueryOrder, Set,
};

use super::ProductStore;
use crate::{
    entity::products::{ActiveModel, Column, Entity as Products},
    models::{Product, ProductRecord, cost_to_cents},
};

#[derive(Debug, Clone)]
pub struct SeaOrmProductStore {
    conn: DatabaseConnection,
}

impl SeaOrmProductStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

fn cents(record: &ProductRecord) -> Result<i64, DbErr> {
    cost_to_cents(record.cost)
        .ok_or_else(|| DbErr::Custom(format!("cost {} is out of range", record.cost)))
}

#[async_trait]
impl ProductStore for SeaOrmProductStore {
    async fn insert(&self, record: ProductRecord) -> Result<Product, DbErr> {
        let cost_cents = cents(&record)?;
        let now = Utc::now();
        let active = ActiveModel {
            id: NotSet,
            title: Set(record.title),
            cost_cents: Set(cost_cents),
            description: Set(record.description),
            product_image: Set(record.product_image),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };
        active.insert(&self.conn).await
    }

    async fn find(&self, id: i32) -> Result<Option<Product>, DbErr> {
        Products::find_by_id(id).one(&self.conn).await
    }

    async fn find_all(&self) -> Result<Vec<Product>, DbErr> {
        Products::find()
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
    }

    async fn update(&self, id: i32, record: ProductRecord) -> Result<Product, DbErr> {
        let cost_cents = cents(&record)?;
        let active = ActiveModel {
            id: Unchanged(id),
            title: Set(record.title),
            cost_cents: Set(cost_cents),
            description: Set(record.description),
            product_image: Set(record.product_image),
            created_at: NotSet,
            updated_at: Set(Some(Utc::now())),
        };
        active.update(&self.conn).await
    }

    async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = Products::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
