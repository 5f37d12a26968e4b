//! JustHydrate Library
//!
//! Drink logging and hydration/nutrition calculations.

pub mod build_info;
pub mod config;
pub mod db;
pub mod hydration;
pub mod mcp;
pub mod models;
pub mod repository;
pub mod tools;
