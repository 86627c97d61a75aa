//! Device descriptor — identity of a piece of equipment offered by a provider.

use serde::{Deserialize, Serialize};

use crate::error::{StarhookError, ValidationError};

/// Kind of equipment a provider can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    Weather,
    Camera,
    Telescope,
    Focuser,
}

impl std::fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Weather => "weather",
            Self::Camera => "camera",
            Self::Telescope => "telescope",
            Self::Focuser => "focuser",
        })
    }
}

/// Immutable identity of a device a provider makes available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub unique_id: String,
    pub device_id: String,
    pub category: DeviceCategory,
}

impl DeviceDescriptor {
    /// Create a builder for constructing a [`DeviceDescriptor`].
    #[must_use]
    pub fn builder(category: DeviceCategory) -> DeviceDescriptorBuilder {
        DeviceDescriptorBuilder {
            category,
            unique_id: None,
            device_id: None,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`StarhookError::Validation`] when either id is empty.
    pub fn validate(&self) -> Result<(), StarhookError> {
        if self.unique_id.is_empty() {
            return Err(ValidationError::EmptyField { field: "unique_id" }.into());
        }
        if self.device_id.is_empty() {
            return Err(ValidationError::EmptyField { field: "device_id" }.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`DeviceDescriptor`].
#[derive(Debug)]
pub struct DeviceDescriptorBuilder {
    category: DeviceCategory,
    unique_id: Option<String>,
    device_id: Option<String>,
}

impl DeviceDescriptorBuilder {
    #[must_use]
    pub fn unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Consume the builder, validate, and return a [`DeviceDescriptor`].
    ///
    /// # Errors
    ///
    /// Returns [`StarhookError::Validation`] if an id is missing or empty.
    pub fn build(self) -> Result<DeviceDescriptor, StarhookError> {
        let descriptor = DeviceDescriptor {
            unique_id: self.unique_id.unwrap_or_default(),
            device_id: self.device_id.unwrap_or_default(),
            category: self.category,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}
