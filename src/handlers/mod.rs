// handlers/mod.rs - request handlers
//
// home      → GET /, GET /health
// entity    → the five CRUD routes, generic over every Entity
// relations → traversal of customer orders/account and order products

pub mod entity;
pub mod home;
pub mod relations;
