use serde::Serialize;
use sqlx::FromRow;

use super::{Entity, EntityError, PgQuery};
use crate::schema::{ProductInput, Schema, PRODUCT};

/// Prices are whole currency units; there is no fractional amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub inventory: i32,
}

impl Entity for Product {
    type Input = ProductInput;

    const TABLE: &'static str = "products";
    const LABEL: &'static str = "Product";
    const COLUMNS: &'static [&'static str] = &["id", "name", "price", "inventory"];

    fn schema() -> &'static Schema {
        &PRODUCT
    }

    fn from_input(input: ProductInput) -> Result<Self, EntityError> {
        Ok(Self {
            id: input.id,
            name: input.name,
            price: input.price,
            inventory: input.inventory,
        })
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.name.as_str())
            .bind(self.price)
            .bind(self.inventory)
    }
}
