//! Application services (use-cases).

pub mod equipment_catalog;
