pub mod app;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod error;
pub mod lore;
pub mod market;
pub mod pack;
pub mod schedule;
pub mod ui;
