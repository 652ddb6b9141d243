//! CLI command implementations

pub mod check;
pub mod common;
pub mod compare;
pub mod routes;
