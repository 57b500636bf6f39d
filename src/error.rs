//! Error types for the SSD1322 bus display driver.

/// Errors that can occur while configuring or talking to the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The requested display configuration cannot be driven by the controller.
    #[error("invalid display configuration: {0}")]
    Config(#[from] ConfigError),

    /// A write on the display bus (SPI or D/C pin) failed.
    #[error("display bus transport failed")]
    Transport,

    /// A frame was streamed before the bus display received its setup parameters.
    #[error("bus display has not been set up")]
    NotSetUp,

    /// A frame buffer of the wrong length was supplied.
    #[error("frame buffer is {actual} bytes, expected {expected}")]
    BufferSize {
        /// Bytes needed to cover the display window.
        expected: usize,
        /// Bytes actually supplied.
        actual: usize,
    },
}

/// Reasons a display configuration is rejected at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The active height after rotation is outside the 1/1 to 1/64 duty range.
    #[error("active height {0} outside the supported 1-64 multiplex range")]
    ActiveHeight(u16),

    /// The rotation is not one of 0, 90, 180 or 270 degrees.
    #[error("rotation of {0} degrees is not supported")]
    Rotation(u16),

    /// The display window does not fit the controller RAM, or is not aligned to whole columns.
    #[error("display window does not fit controller RAM")]
    Window,

    /// The bus display was given a color depth other than 1, 2, 4 or 8 bits, or a column address
    /// covering no bytes.
    #[error("unsupported pixel format: {color_depth} bpp, {bytes_per_cell} bytes per column")]
    PixelFormat {
        /// Bits per pixel requested.
        color_depth: u8,
        /// Bytes per column address requested.
        bytes_per_cell: u8,
    },
}
