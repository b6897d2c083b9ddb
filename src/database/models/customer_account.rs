use serde::Serialize;
use sqlx::FromRow;

use super::{Entity, EntityError, PgQuery};
use crate::auth::hash_password;
use crate::schema::{CustomerAccountInput, Schema, CUSTOMER_ACCOUNT};

/// Login account belonging to exactly one customer.
///
/// Only an Argon2 hash of the password is stored, and it is never serialized.
#[derive(Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CustomerAccount {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub id: i32,
    pub customer_id: i32,
}

impl std::fmt::Debug for CustomerAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerAccount")
            .field("username", &self.username)
            .field("id", &self.id)
            .field("customer_id", &self.customer_id)
            .finish_non_exhaustive()
    }
}

impl Entity for CustomerAccount {
    type Input = CustomerAccountInput;

    const TABLE: &'static str = "customer_accounts";
    const LABEL: &'static str = "Customer Account";
    const COLUMNS: &'static [&'static str] = &["id", "username", "password_hash", "customer_id"];

    fn schema() -> &'static Schema {
        &CUSTOMER_ACCOUNT
    }

    fn from_input(input: CustomerAccountInput) -> Result<Self, EntityError> {
        Ok(Self {
            password_hash: hash_password(&input.password)?,
            username: input.username,
            id: input.id,
            customer_id: input.customer_id,
        })
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.username.as_str())
            .bind(self.password_hash.as_str())
            .bind(self.customer_id)
    }
}
