//! Row types for the four entities and the [`Entity`] trait that lets one
//! generic repository and one set of handlers serve all of them.

pub mod customer;
pub mod customer_account;
pub mod order;
pub mod product;

pub use customer::Customer;
pub use customer_account::CustomerAccount;
pub use order::Order;
pub use product::Product;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, Postgres};

use crate::auth::PasswordError;
use crate::schema::Schema;

pub type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// A table-backed record with a client-supplied integer identifier.
pub trait Entity:
    Serialize + for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + Sized + 'static
{
    /// Validated request body
    type Input: DeserializeOwned + Send;

    const TABLE: &'static str;
    /// Label used in client-facing messages, e.g. "Customer Account"
    const LABEL: &'static str;
    /// Stored columns in bind order; `id` comes first
    const COLUMNS: &'static [&'static str];

    fn schema() -> &'static Schema;

    /// Turn validated input into the row that gets stored.
    fn from_input(input: Self::Input) -> Result<Self, EntityError>;

    fn id(&self) -> i32;

    /// Bind every column value, in `COLUMNS` order.
    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;
}
