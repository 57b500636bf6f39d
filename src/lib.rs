//! Driver library for the Solomon Systech SSD1322 dot matrix OLED display driver, in the shape a
//! bus-display framework expects: the driver builds the panel's power-up command sequence for the
//! requested geometry, hands it to the bus display together with the controller's pixel format,
//! and afterwards only issues the sleep and wake commands itself.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod bus;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod init;
pub mod interface;

// Re-exports for primary API.
pub use bus::{BusDisplayParams, DisplayBus, FourWire, PanelFormat};
pub use config::{Config, Geometry, Rotation};
pub use controller::{PowerState, Ssd1322};
pub use error::{ConfigError, Error};
pub use init::InitSequence;
pub use interface::spi::SpiInterface;
