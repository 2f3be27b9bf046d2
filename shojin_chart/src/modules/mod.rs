pub mod chart;
pub mod models;
