//! DTOs de la API

pub mod payment_dto;
pub mod pin_dto;
pub mod shipment_dto;
pub mod stats_dto;
