use sqlx::PgPool;
use tracing::info;

use super::DatabaseError;

/// Statements creating every table, in dependency order.
///
/// Foreign keys restrict both delete and update: a referenced row can be
/// neither removed nor re-identified while something still points at it.
pub const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id INTEGER PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(320) NOT NULL,
        phone VARCHAR(15) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS customer_accounts (
        id INTEGER PRIMARY KEY,
        username VARCHAR(255) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        customer_id INTEGER NOT NULL,
        CONSTRAINT customer_accounts_customer_id_key UNIQUE (customer_id),
        CONSTRAINT customer_accounts_customer_id_fkey FOREIGN KEY (customer_id)
            REFERENCES customers (id) ON DELETE RESTRICT ON UPDATE RESTRICT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        price INTEGER NOT NULL,
        inventory INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY,
        "date" DATE NOT NULL,
        customer_id INTEGER NOT NULL,
        CONSTRAINT orders_customer_id_fkey FOREIGN KEY (customer_id)
            REFERENCES customers (id) ON DELETE RESTRICT ON UPDATE RESTRICT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS order_products (
        order_id INTEGER NOT NULL,
        product_id INTEGER NOT NULL,
        CONSTRAINT order_products_pkey PRIMARY KEY (order_id, product_id),
        CONSTRAINT order_products_order_id_fkey FOREIGN KEY (order_id)
            REFERENCES orders (id) ON DELETE RESTRICT ON UPDATE RESTRICT,
        CONSTRAINT order_products_product_id_fkey FOREIGN KEY (product_id)
            REFERENCES products (id) ON DELETE RESTRICT ON UPDATE RESTRICT
    )
    "#,
];

/// Create any missing tables. Existing tables are left untouched.
pub async fn create_tables(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut tx = pool.begin().await?;
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!("Database schema ready ({} tables)", CREATE_TABLES.len());
    Ok(())
}
