use sqlx::PgPool;

use crate::database::{Entity, OrderProductRepository, Repository};

/// Shared handler state. The pool is built once at startup and cloned
/// cheaply into every request.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn repository<E: Entity>(&self) -> Repository<E> {
        Repository::new(self.pool.clone())
    }

    pub fn order_products(&self) -> OrderProductRepository {
        OrderProductRepository::new(self.pool.clone())
    }
}
