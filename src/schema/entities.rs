//! Request schemas and typed inputs for the four entities.
//!
//! Field order here is also the order fields are written back out, and every
//! field is required (identifiers included) on both create and update.

use chrono::NaiveDate;
use serde::Deserialize;

use super::{Field, Schema};

pub const CUSTOMER: Schema = Schema {
    name: "Customer",
    fields: &[
        Field::integer("id"),
        Field::string("name").max_len(255),
        Field::string("email").max_len(320),
        Field::string("phone").max_len(15),
    ],
};

pub const CUSTOMER_ACCOUNT: Schema = Schema {
    name: "Customer Account",
    fields: &[
        Field::string("username").max_len(255),
        Field::string("password").max_len(255),
        Field::integer("id"),
        Field::integer("customer_id"),
    ],
};

pub const PRODUCT: Schema = Schema {
    name: "Product",
    fields: &[
        Field::integer("id"),
        Field::string("name").max_len(255),
        Field::integer("price"),
        Field::integer("inventory"),
    ],
};

pub const ORDER: Schema = Schema {
    name: "Order",
    fields: &[
        Field::integer("id"),
        Field::date("date"),
        Field::integer("customer_id"),
    ],
};

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerInput {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Carries the plain-text password only until it is hashed.
#[derive(Clone, Deserialize)]
pub struct CustomerAccountInput {
    pub username: String,
    pub password: String,
    pub id: i32,
    pub customer_id: i32,
}

impl std::fmt::Debug for CustomerAccountInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerAccountInput")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("id", &self.id)
            .field("customer_id", &self.customer_id)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub inventory: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderInput {
    pub id: i32,
    pub date: NaiveDate,
    pub customer_id: i32,
}
