//! The bus display: the collaborator that owns the link to the panel, runs the init sequence, and
//! streams framebuffer contents into display RAM.
//!
//! The controller driver talks to it through `DisplayBus`, which has two distinct entry points. A
//! bulk `setup` runs once at construction with everything needed to bring the panel up and address
//! its RAM, while `send` writes a single command outside of any frame transfer.

use log::trace;

use crate::command::consts::{BUF_COL_MAX, BYTES_PER_BUF_COL, COLOR_DEPTH, PIXEL_ROW_MAX};
use crate::command::opcode;
use crate::config::{Config, Geometry};
use crate::error::{ConfigError, Error};
use crate::init::InitSequence;
use crate::interface::DisplayInterface;

/// How a bus display addresses and packs pixels for a controller family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelFormat {
    pub geometry: Geometry,
    /// First segment column of the panel in controller RAM, in pixels.
    pub column_offset: u16,
    /// First row of the panel in controller RAM.
    pub row_offset: u8,
    /// Bits per pixel.
    pub color_depth: u8,
    pub grayscale: bool,
    pub set_column_command: u8,
    pub set_row_command: u8,
    pub write_ram_command: u8,
    /// Window bounds are sent as one byte each rather than two.
    pub single_byte_bounds: bool,
    /// Pixels within a transmitted byte are in the reverse of framebuffer order.
    pub reverse_pixels_in_byte: bool,
    /// Bytes of RAM covered by one column address.
    pub bytes_per_cell: u8,
}

/// A RAM address window, as inclusive `(start, end)` column cells and rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub columns: (u16, u16),
    pub rows: (u16, u16),
}

impl PanelFormat {
    /// The fixed format of the SSD1322: 4-bit grayscale, two bytes (four pixels) per column
    /// address, single-byte window bounds, and the leftmost pixel of each byte in the high nibble
    /// as the init sequence's remap setting expects.
    pub fn ssd1322(config: &Config) -> Self {
        PanelFormat {
            geometry: *config.geometry(),
            column_offset: config.get_column_offset(),
            row_offset: config.get_row_offset(),
            color_depth: COLOR_DEPTH,
            grayscale: true,
            set_column_command: opcode::SET_COLUMN_ADDRESS,
            set_row_command: opcode::SET_ROW_ADDRESS,
            write_ram_command: opcode::WRITE_RAM,
            single_byte_bounds: true,
            reverse_pixels_in_byte: true,
            bytes_per_cell: BYTES_PER_BUF_COL,
        }
    }

    /// Pixels covered by one column address, or 0 for a zero color depth.
    pub fn pixels_per_cell(&self) -> u16 {
        (self.bytes_per_cell as u16 * 8)
            .checked_div(self.color_depth as u16)
            .unwrap_or(0)
    }

    /// Checks that pixels pack evenly into bytes and that a column address covers at least one
    /// byte.
    pub fn check_pixel_format(&self) -> Result<(), Error> {
        match (self.color_depth, self.bytes_per_cell) {
            (1 | 2 | 4 | 8, 1..) => Ok(()),
            _ => Err(ConfigError::PixelFormat {
                color_depth: self.color_depth,
                bytes_per_cell: self.bytes_per_cell,
            }
            .into()),
        }
    }

    /// Bytes in one full frame.
    pub fn frame_len(&self) -> usize {
        let (cols, rows) = self.geometry.native_size();
        cols as usize * rows as usize * self.color_depth as usize / 8
    }

    /// The RAM window the panel occupies. Fails if the pixel format is unusable, or if the window
    /// is empty, does not start and end on a column cell boundary, or runs past the end of
    /// controller RAM.
    pub fn window(&self) -> Result<Window, Error> {
        self.check_pixel_format()?;
        let (cols, rows) = self.geometry.native_size();
        let ppc = self.pixels_per_cell() as u32;
        let (cols, rows, col_off) = (cols as u32, rows as u32, self.column_offset as u32);
        if false
            || cols == 0
            || rows == 0
            || cols % ppc != 0
            || col_off % ppc != 0
            || (col_off + cols) / ppc - 1 > BUF_COL_MAX as u32
            || self.row_offset as u32 + rows - 1 > PIXEL_ROW_MAX as u32
        {
            return Err(ConfigError::Window.into());
        }
        let first_col = col_off / ppc;
        let first_row = self.row_offset as u32;
        Ok(Window {
            columns: (first_col as u16, (first_col + cols / ppc - 1) as u16),
            rows: (first_row as u16, (first_row + rows - 1) as u16),
        })
    }
}

/// Everything a bus display needs at setup. The init sequence is handed over by value; the bus
/// display may keep it or drop it once sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusDisplayParams {
    pub init_sequence: InitSequence,
    pub format: PanelFormat,
}

/// The capabilities a controller driver needs from the bus display it sits on.
pub trait DisplayBus {
    /// Write one command and its argument bytes.
    fn send(&mut self, command: u8, args: &[u8]) -> Result<(), Error>;

    /// Run the init sequence and take on the panel format for later frame transfers.
    fn setup(&mut self, params: BusDisplayParams) -> Result<(), Error>;
}

/// Reverse the order of the pixels packed into a byte.
fn reverse_pixels(byte: u8, depth: u8) -> u8 {
    let per_byte = 8 / depth;
    let mask = ((1u16 << depth) - 1) as u8;
    (0..per_byte).fold(0, |acc, i| {
        let px = (byte >> (i * depth)) & mask;
        acc | px << ((per_byte - 1 - i) * depth)
    })
}

/// A bus display over a 4-wire command/data interface.
///
/// This is more than the transport: `DI` moves the bytes and distinguishes commands from data,
/// while `FourWire` is the display side of the bus. It runs the init sequence at `setup`, keeps the
/// panel format, and streams whole frames into the RAM window with `write_frame`.
pub struct FourWire<DI> {
    iface: DI,
    format: Option<PanelFormat>,
}

impl<DI> FourWire<DI>
where
    DI: DisplayInterface,
{
    /// Wrap an interface. Nothing is sent until `setup`.
    pub fn new(iface: DI) -> Self {
        FourWire {
            iface,
            format: None,
        }
    }

    /// The format received at setup, if setup has run.
    pub fn format(&self) -> Option<&PanelFormat> {
        self.format.as_ref()
    }

    /// Write a full frame of packed pixel data into the panel's RAM window. Pixels are in
    /// controller orientation, left-to-right then top-to-bottom, packed as many to a byte as the
    /// color depth allows with the leftmost pixel in the low bits. `reverse_pixels_in_byte` flips
    /// that order on the way out.
    pub fn write_frame(&mut self, pixels: &[u8]) -> Result<(), Error> {
        let format = self.format.ok_or(Error::NotSetUp)?;
        let window = format.window()?;
        let expected = format.frame_len();
        if pixels.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }

        self.send_bounds(format.set_column_command, window.columns, format.single_byte_bounds)?;
        self.send_bounds(format.set_row_command, window.rows, format.single_byte_bounds)?;
        self.iface.send_command(format.write_ram_command)?;

        // Stream through a small buffer so the pixel order can be fixed up on the way out without
        // copying the whole frame.
        let mut buf = [0u8; 32];
        for chunk in pixels.chunks(buf.len()) {
            let out = &mut buf[..chunk.len()];
            for (slot, &px) in out.iter_mut().zip(chunk) {
                *slot = match format.reverse_pixels_in_byte {
                    true => reverse_pixels(px, format.color_depth),
                    false => px,
                };
            }
            self.iface.send_data(out)?;
        }
        Ok(())
    }

    /// Give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }

    fn send_bounds(
        &mut self,
        cmd: u8,
        (start, end): (u16, u16),
        single_byte: bool,
    ) -> Result<(), Error> {
        if single_byte {
            self.send(cmd, &[start as u8, end as u8])
        } else {
            let [s_hi, s_lo] = start.to_be_bytes();
            let [e_hi, e_lo] = end.to_be_bytes();
            self.send(cmd, &[s_hi, s_lo, e_hi, e_lo])
        }
    }
}

impl<DI> DisplayBus for FourWire<DI>
where
    DI: DisplayInterface,
{
    fn send(&mut self, command: u8, args: &[u8]) -> Result<(), Error> {
        self.iface.send_command(command)?;
        if args.is_empty() {
            Ok(())
        } else {
            self.iface.send_data(args)
        }
    }

    fn setup(&mut self, params: BusDisplayParams) -> Result<(), Error> {
        params.format.window()?;
        for (cmd, args) in params.init_sequence.commands() {
            trace!("init: {:#04x} {:02x?}", cmd, args);
            self.send(cmd, args)?;
        }
        self.format = Some(params.format);
        Ok(())
    }
}

#[cfg(test)]
pub mod test_spy {
    //! A bus display for use in unit tests that records what the driver asked of it.

    use super::{BusDisplayParams, DisplayBus};
    use crate::error::Error;
    use std::vec::Vec;

    #[derive(Default)]
    pub struct SpyBus {
        pub sent: Vec<(u8, Vec<u8>)>,
        pub setups: Vec<BusDisplayParams>,
        /// When set, every call fails as if the bus faulted.
        pub failing: bool,
    }

    impl SpyBus {
        pub fn new() -> Self {
            Self::default()
        }
        pub fn commands(&self) -> Vec<u8> {
            self.sent.iter().map(|(cmd, _)| *cmd).collect()
        }
    }

    impl DisplayBus for SpyBus {
        fn send(&mut self, command: u8, args: &[u8]) -> Result<(), Error> {
            if self.failing {
                return Err(Error::Transport);
            }
            self.sent.push((command, args.to_vec()));
            Ok(())
        }

        fn setup(&mut self, params: BusDisplayParams) -> Result<(), Error> {
            if self.failing {
                return Err(Error::Transport);
            }
            self.setups.push(params);
            Ok(())
        }
    }
}
