//! Acceso a la base de datos

pub mod connection;
pub mod schema;

pub use connection::DatabaseConnection;
