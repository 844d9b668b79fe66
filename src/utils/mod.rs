//! Utilidades compartidas

pub mod errors;
pub mod phone;
pub mod validation;
