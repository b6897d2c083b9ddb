pub mod ddl;
pub mod manager;
pub mod models;
pub mod order_products;
pub mod repository;

pub use manager::{ConstraintKind, DatabaseError, DatabaseManager};
pub use models::{Customer, CustomerAccount, Entity, EntityError, Order, Product};
pub use order_products::OrderProductRepository;
pub use repository::Repository;
