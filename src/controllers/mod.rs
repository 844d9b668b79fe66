//! Controllers de la API

pub mod content_controller;
pub mod payment_controller;
pub mod pin_controller;
pub mod shipment_controller;
