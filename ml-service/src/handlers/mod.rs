//! HTTP handlers

pub mod anomalies;
pub mod categories;
pub mod health;
pub mod predict;
