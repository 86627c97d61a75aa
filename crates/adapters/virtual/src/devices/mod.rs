//! Virtual device implementations.

mod weather;

pub use weather::VirtualWeatherStation;
