//! HTTP handlers

pub mod auth;
pub mod brand;
pub mod health;
