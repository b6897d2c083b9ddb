use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::{Entity, EntityError, PgQuery};
use crate::schema::{OrderInput, Schema, ORDER};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Order {
    pub id: i32,
    pub date: NaiveDate,
    pub customer_id: i32,
}

impl Entity for Order {
    type Input = OrderInput;

    const TABLE: &'static str = "orders";
    const LABEL: &'static str = "Order";
    const COLUMNS: &'static [&'static str] = &["id", "date", "customer_id"];

    fn schema() -> &'static Schema {
        &ORDER
    }

    fn from_input(input: OrderInput) -> Result<Self, EntityError> {
        Ok(Self {
            id: input.id,
            date: input.date,
            customer_id: input.customer_id,
        })
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(self.id).bind(self.date).bind(self.customer_id)
    }
}
