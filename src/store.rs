use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};

use crate::{
    db::{OrmConn, verify_connection},
    entity::product::{ActiveModel, Column, Entity as Products, Model as ProductModel},
};

/// Fields of a product about to be inserted.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
}

/// Field replacements for an update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Page {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StockAdjustment {
    Applied(ProductModel),
    NotFound,
    Insufficient { stock: i32 },
    Overflow { stock: i32 },
}

/// Persistence for the `product` table.
#[derive(Clone)]
pub struct ProductStore {
    conn: OrmConn,
}

impl ProductStore {
    pub fn new(conn: OrmConn) -> Self {
        Self { conn }
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        verify_connection(&self.conn).await
    }

    pub async fn find(&self, id: i32) -> Result<Option<ProductModel>, DbErr> {
        Products::find_by_id(id).one(&self.conn).await
    }

    /// Newest first. Without a limit the whole table is returned.
    pub async fn list(&self, page: Page) -> Result<Vec<ProductModel>, DbErr> {
        let mut finder = Products::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);
        if let Some(limit) = page.limit {
            finder = finder.limit(limit);
        }
        if let Some(offset) = page.offset {
            finder = finder.offset(offset);
        }
        finder.all(&self.conn).await
    }

    pub async fn insert(&self, product: NewProduct) -> Result<ProductModel, DbErr> {
        let active = ActiveModel {
            id: NotSet,
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            stock: Set(product.stock),
            created_at: Set(Utc::now().into()),
        };
        active.insert(&self.conn).await
    }

    pub async fn update(
        &self,
        existing: ProductModel,
        changes: ProductChanges,
    ) -> Result<ProductModel, DbErr> {
        let mut active: ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(stock) = changes.stock {
            active.stock = Set(stock);
        }
        active.update(&self.conn).await
    }

    /// Returns `false` when no row had the id.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = Products::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Apply `delta` to the stock of `id` unless the result would leave the
    /// range `0..=i32::MAX`.
    ///
    /// The bound is checked by the `UPDATE` itself (`stock >= -delta`, or
    /// `stock <= i32::MAX - delta` when adding), so two concurrent adjustments
    /// can never both pass against the same stale value. The follow-up read
    /// happens in the same transaction.
    pub async fn adjust_stock(&self, id: i32, delta: i32) -> Result<StockAdjustment, DbErr> {
        let bound = if delta < 0 {
            let floor = delta
                .checked_neg()
                .ok_or_else(|| DbErr::Custom(format!("stock delta {delta} is out of range")))?;
            Column::Stock.gte(floor)
        } else {
            Column::Stock.lte(i32::MAX - delta)
        };

        let txn = self.conn.begin().await?;
        let result = Products::update_many()
            .col_expr(Column::Stock, Expr::col(Column::Stock).add(delta))
            .filter(Column::Id.eq(id))
            .filter(bound)
            .exec(&txn)
            .await?;

        let current = Products::find_by_id(id).one(&txn).await?;
        txn.commit().await?;

        let outcome = match current {
            None => StockAdjustment::NotFound,
            Some(product) if result.rows_affected == 0 && delta < 0 => {
                StockAdjustment::Insufficient {
                    stock: product.stock,
                }
            }
            Some(product) if result.rows_affected == 0 => StockAdjustment::Overflow {
                stock: product.stock,
            },
            Some(product) => StockAdjustment::Applied(product),
        };
        Ok(outcome)
    }
}
