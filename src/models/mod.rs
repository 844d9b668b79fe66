//! Modelos de dominio

pub mod customer_pin;
pub mod payment;
pub mod shipment;

pub use customer_pin::CustomerPin;
pub use payment::Payment;
pub use shipment::Shipment;
