pub mod analysis;
pub mod api;
pub mod logging;
pub mod models;
pub mod parser;
pub mod report;
pub mod ui;
