//! The power-up command sequence for the SSD1322.
//!
//! The sequence is a vendor-specified table of command records, each laid out as the opcode, the
//! number of argument bytes, then the arguments. It brings up a Newhaven NHD-3.12-25664 class
//! module (256x64, dual COM line layout) and ends by turning the display on. Only the multiplex
//! ratio depends on the panel in use, so the table is a constant and a built sequence differs from
//! it at exactly one byte, `MUX_RATIO_OFFSET`.

use crate::command::consts::{MUX_RATIO_MAX, MUX_RATIO_MIN};
use crate::command::opcode::*;
use crate::config::Geometry;
use crate::error::{ConfigError, Error};

/// Length in bytes of the init sequence.
pub const INIT_SEQUENCE_LEN: usize = 76;

/// Offset of the multiplex ratio argument within the init sequence.
pub const MUX_RATIO_OFFSET: usize = 10;

#[cfg_attr(rustfmt, rustfmt_skip)]
const TEMPLATE: [u8; INIT_SEQUENCE_LEN] = [
    SET_COMMAND_LOCK, 1, 0x12, // unlock
    SLEEP_MODE_ON, 0, // display off
    SET_CLOCK_DIVIDER, 1, 0x91, // ~80 frames/sec
    SET_MUX_RATIO, 1, 0x3F, // 1/64 duty, patched
    SET_DISPLAY_OFFSET, 1, 0x00,
    SET_START_LINE, 1, 0x00,
    // Horizontal increment, column 0 to SEG0, forward nibble order (high nibble is the leftmost
    // pixel), scan COM[N-1] to COM0, dual COM line mode.
    SET_REMAP_FORMAT, 2, 0x14, 0x11,
    SET_GPIO, 1, 0x00, // GPIO pins disabled
    SET_FUNCTION_SELECTION, 1, 0x01, // internal VDD regulator
    SET_DISPLAY_ENHANCEMENT_A, 2, 0xA0, 0xFD, // external VSL
    SET_CONTRAST_CURRENT, 1, 0x9F,
    SET_MASTER_CURRENT, 1, 0x0F,
    SET_GRAY_SCALE_TABLE, 15,
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07,
        0x08, 0x10, 0x40, 0x90, 0xA0, 0xB0, 0xB4,
    SET_PHASE_LENGTH, 1, 0xE2, // phase 1 5 DCLKs, phase 2 14 DCLKs
    SET_DISPLAY_ENHANCEMENT_B, 2, 0xA2, 0x20,
    SET_PRECHARGE_VOLTAGE, 1, 0x1F, // 0.60*Vcc
    SET_SECOND_PRECHARGE_PERIOD, 1, 0x08, // 8 DCLKs
    SET_VCOMH, 1, 0x07, // 0.86*Vcc
    DISPLAY_NORMAL, 0,
    DISABLE_PARTIAL_DISPLAY, 0,
    SLEEP_MODE_OFF, 0, // display on
];

/// Encode an active row count as the multiplex ratio register value. The register is zero-based,
/// so 1/N duty is written as N-1.
pub fn mux_ratio_byte(active_height: u16) -> Result<u8, Error> {
    match active_height {
        MUX_RATIO_MIN..=MUX_RATIO_MAX => Ok((active_height - 1) as u8),
        _ => Err(ConfigError::ActiveHeight(active_height).into()),
    }
}

/// An init sequence ready to be handed to a bus display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitSequence([u8; INIT_SEQUENCE_LEN]);

impl InitSequence {
    /// The unpatched vendor sequence.
    pub fn template() -> Self {
        InitSequence(TEMPLATE)
    }

    /// Build the sequence for a panel, patching the multiplex ratio to its active height.
    pub fn for_geometry(geometry: &Geometry) -> Result<Self, Error> {
        let mux = mux_ratio_byte(geometry.active_height())?;
        let mut seq = TEMPLATE;
        seq[MUX_RATIO_OFFSET] = mux;
        Ok(InitSequence(seq))
    }

    /// The multiplex ratio register value this sequence programs.
    pub fn mux_ratio(&self) -> u8 {
        self.0[MUX_RATIO_OFFSET]
    }

    /// The raw records, as sent.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Iterate over the command records as `(opcode, arguments)` pairs.
    pub fn commands(&self) -> Commands<'_> {
        Commands { rest: &self.0 }
    }
}

impl AsRef<[u8]> for InitSequence {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Iterator over the records of an init sequence.
pub struct Commands<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Commands<'a> {
    type Item = (u8, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest;
        let (opcode, count) = match *rest {
            [opcode, count, ..] => (opcode, count as usize),
            _ => return None,
        };
        if rest.len() < 2 + count {
            // Truncated trailing record.
            self.rest = &[];
            return None;
        }
        let (record, tail) = rest.split_at(2 + count);
        self.rest = tail;
        Some((opcode, &record[2..]))
    }
}
