//! Middleware HTTP

pub mod admin;
pub mod cors;
