//! Domain layer - core business logic and entities

pub mod alarm;
pub mod alert;
pub mod price;
pub mod subnet;
