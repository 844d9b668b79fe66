//! Servicios de dominio

pub mod delivery_gate;
pub mod pin_service;
pub mod shipment_lifecycle;
