use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Entity, Product};
use crate::database::repository::quote_identifier;

/// The order-product join table. A pair is either linked or not; it carries
/// no attributes of its own.
pub struct OrderProductRepository {
    pool: PgPool,
}

impl OrderProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Products linked to an order, ordered by product id.
    pub async fn products_for_order(&self, order_id: i32) -> Result<Vec<Product>, DatabaseError> {
        let columns = Product::COLUMNS
            .iter()
            .map(|c| format!("p.{}", quote_identifier(c)))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {} FROM {} p \
             JOIN order_products op ON op.product_id = p.\"id\" \
             WHERE op.order_id = $1 \
             ORDER BY p.\"id\"",
            columns,
            quote_identifier(Product::TABLE)
        );

        let rows = sqlx::query_as::<_, Product>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Link a product to an order; linking the same pair twice is a unique
    /// violation.
    pub async fn link(&self, order_id: i32, product_id: i32) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO order_products (order_id, product_id) VALUES ($1, $2)")
            .bind(order_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn unlink(&self, order_id: i32, product_id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM order_products WHERE order_id = $1 AND product_id = $2")
            .bind(order_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "Product {} is not part of Order {}",
                product_id, order_id
            )));
        }
        Ok(())
    }
}
