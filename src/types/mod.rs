pub mod config;
pub mod coordinate;
pub mod fuel_type;
pub mod station;
