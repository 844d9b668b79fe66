//! Backend de seguimiento y cobro de envíos de carga.
//!
//! API REST sobre PostgreSQL: registro de envíos, cobro de pagos y
//! despacho de entregas autorizado con un PIN de 4 dígitos ligado al
//! teléfono del cliente.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
