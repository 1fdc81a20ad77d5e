//! HTTP request handlers

pub mod chatbot;
pub mod hazards;
pub mod health;
pub mod prediction;

pub use chatbot::ask_chatbot;
pub use hazards::{list_earthquakes, list_tsunami_alerts, refresh_earthquakes, refresh_tsunami_alerts};
pub use health::health_check;
pub use prediction::predict_impact;
