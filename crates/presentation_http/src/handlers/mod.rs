//! HTTP request handlers

pub mod common;
pub mod export;
pub mod health;
pub mod weather;
