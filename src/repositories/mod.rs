//! Repositorios de acceso a datos

pub mod content_repository;
pub mod payment_repository;
pub mod pin_repository;
pub mod shipment_repository;
