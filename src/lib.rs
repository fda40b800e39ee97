//! CRUD HTTP API over the tuits and users collections.
//!
//! Layering is handler → DAO → driver: a route handler reads path/body
//! parameters, calls exactly one DAO method and writes the result back as
//! JSON; a DAO method issues exactly one MongoDB operation.
pub mod models;
pub mod server;
