pub mod config;
pub mod models;
pub mod processing;
pub mod render;
pub mod report_generator;
pub mod server;
pub mod utils;
pub mod validation;

pub use report_generator::ReportGenerator;
