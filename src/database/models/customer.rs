use serde::Serialize;
use sqlx::FromRow;

use super::{Entity, EntityError, PgQuery};
use crate::schema::{CustomerInput, Schema, CUSTOMER};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Entity for Customer {
    type Input = CustomerInput;

    const TABLE: &'static str = "customers";
    const LABEL: &'static str = "Customer";
    const COLUMNS: &'static [&'static str] = &["id", "name", "email", "phone"];

    fn schema() -> &'static Schema {
        &CUSTOMER
    }

    fn from_input(input: CustomerInput) -> Result<Self, EntityError> {
        Ok(Self {
            id: input.id,
            name: input.name,
            email: input.email,
            phone: input.phone,
        })
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.name.as_str())
            .bind(self.email.as_str())
            .bind(self.phone.as_str())
    }
}
