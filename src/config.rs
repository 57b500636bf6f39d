//! Defines structs describing the panel attached to the SSD1322 and how the bus display should
//! address it.

use crate::error::{ConfigError, Error};

/// Rotation of the framebuffer relative to the panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Convert integer degrees, which must be one of 0, 90, 180 or 270.
    pub fn from_degrees(degrees: u16) -> Result<Self, Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(ConfigError::Rotation(degrees).into()),
        }
    }

    /// The rotation in integer degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether this rotation swaps which framebuffer dimension lands on the controller's rows.
    pub fn is_transposed(self) -> bool {
        self.degrees() % 180 != 0
    }
}

/// Framebuffer dimensions in pixels and their rotation onto the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
    pub rotation: Rotation,
}

impl Geometry {
    /// A `width` x `height` framebuffer with the given rotation.
    pub fn new(width: u16, height: u16, rotation: Rotation) -> Self {
        Geometry {
            width,
            height,
            rotation,
        }
    }

    /// The size as seen by the controller, `(segment columns, COM rows)`. A 90 or 270 degree
    /// rotation swaps the framebuffer width and height.
    pub fn native_size(&self) -> (u16, u16) {
        if self.rotation.is_transposed() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Number of controller rows in use, which sets the multiplex ratio.
    pub fn active_height(&self) -> u16 {
        self.native_size().1
    }
}

/// A configuration for the display. Width and height are mandatory because the init sequence
/// cannot be built without them. Rotation and RAM offsets can optionally be set by calling the
/// provided builder methods; they are passed through to the bus display unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    geometry: Geometry,
    column_offset: u16,
    row_offset: u8,
}

impl Config {
    /// Create a new configuration for a `width` x `height` framebuffer, unrotated, starting at
    /// controller column and row 0.
    pub fn new(width: u16, height: u16) -> Self {
        Config {
            geometry: Geometry::new(width, height, Rotation::Deg0),
            column_offset: 0,
            row_offset: 0,
        }
    }

    /// Extend this `Config` to rotate the framebuffer onto the panel.
    pub fn rotation(self, rotation: Rotation) -> Self {
        Self {
            geometry: Geometry {
                rotation,
                ..self.geometry
            },
            ..self
        }
    }

    /// Extend this `Config` with the first segment driven by the panel. Modules narrower than the
    /// 480 segments of the chip often wire their pixel column 0 to a segment in the middle, e.g.
    /// 112 for a 256 pixel wide module. Must be a multiple of 4.
    pub fn column_offset(self, column_offset: u16) -> Self {
        Self {
            column_offset,
            ..self
        }
    }

    /// Extend this `Config` with the first display RAM row shown by the panel.
    pub fn row_offset(self, row_offset: u8) -> Self {
        Self { row_offset, ..self }
    }

    /// Framebuffer size and rotation.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// First segment column driven by the panel.
    pub fn get_column_offset(&self) -> u16 {
        self.column_offset
    }

    /// First display RAM row shown by the panel.
    pub fn get_row_offset(&self) -> u8 {
        self.row_offset
    }
}
