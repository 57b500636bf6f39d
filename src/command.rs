//! The command set and addressing limits of the SSD1322.
//!
//! Note 1: The display RAM of the SSD1322 is arranged in 128 rows and 120 columns, where each
//! column is 4 adjacent pixels (segments) in the row for a total max resolution of 128x480. Each
//! pixel is 4 bits/16 levels of intensity, so each column also refers to two adjacent bytes. Thus,
//! anywhere there is a "column" address, these refer to horizontal groups of 2 bytes driving 4
//! pixels.

pub mod consts {
    //! Controller RAM and driver limits.

    pub const NUM_PIXEL_COLS: u16 = 480;
    pub const NUM_PIXEL_ROWS: u8 = 128;
    pub const PIXELS_PER_BUF_COL: u16 = 4;
    pub const NUM_BUF_COLS: u8 = (NUM_PIXEL_COLS / PIXELS_PER_BUF_COL) as u8;
    pub const PIXEL_ROW_MAX: u8 = NUM_PIXEL_ROWS - 1;
    pub const BUF_COL_MAX: u8 = NUM_BUF_COLS - 1;

    /// Bits per pixel of the display RAM.
    pub const COLOR_DEPTH: u8 = 4;
    /// Bytes of display RAM covered by one column address (Note 1).
    pub const BYTES_PER_BUF_COL: u8 = 2;

    /// Fewest COM lines the multiplex ratio can select.
    pub const MUX_RATIO_MIN: u16 = 1;
    /// Most COM lines the multiplex ratio can select with dual COM line mode enabled, where every
    /// display row is driven by two COM lines.
    pub const MUX_RATIO_MAX: u16 = 64;
}

pub mod opcode {
    //! Command opcodes, in the order they appear in the datasheet command table.

    /// Set the column start and end address range for RAM writes. Range is 0-119. (Note 1)
    pub const SET_COLUMN_ADDRESS: u8 = 0x15;
    /// Write image data into display RAM at the current address window.
    pub const WRITE_RAM: u8 = 0x5C;
    /// Set the row start and end address range for RAM writes. Range is 0-127.
    pub const SET_ROW_ADDRESS: u8 = 0x75;
    /// Set address increment, column remap, nibble remap, COM scan direction and COM layout.
    pub const SET_REMAP_FORMAT: u8 = 0xA0;
    /// Set the display RAM row mapped to the first active COM line.
    pub const SET_START_LINE: u8 = 0xA1;
    /// Set the COM line offset, applied after the multiplex ratio.
    pub const SET_DISPLAY_OFFSET: u8 = 0xA2;
    /// Display mode: show display RAM.
    pub const DISPLAY_NORMAL: u8 = 0xA6;
    /// Drive all rows selected by the multiplex ratio.
    pub const DISABLE_PARTIAL_DISPLAY: u8 = 0xA9;
    /// Select the internal or external VDD regulator.
    pub const SET_FUNCTION_SELECTION: u8 = 0xAB;
    /// Display off, entering sleep mode.
    pub const SLEEP_MODE_ON: u8 = 0xAE;
    /// Display on, leaving sleep mode.
    pub const SLEEP_MODE_OFF: u8 = 0xAF;
    /// Set the reset and first pre-charge phase lengths.
    pub const SET_PHASE_LENGTH: u8 = 0xB1;
    /// Set the oscillator frequency and display clock divider.
    pub const SET_CLOCK_DIVIDER: u8 = 0xB3;
    /// Display enhancement A: VSL source and low gray scale quality.
    pub const SET_DISPLAY_ENHANCEMENT_A: u8 = 0xB4;
    /// Set the GPIO0/GPIO1 pin modes.
    pub const SET_GPIO: u8 = 0xB5;
    /// Set the second pre-charge period.
    pub const SET_SECOND_PRECHARGE_PERIOD: u8 = 0xB6;
    /// Load a 15-entry gray scale pulse width table.
    pub const SET_GRAY_SCALE_TABLE: u8 = 0xB8;
    /// Set the pre-charge voltage level.
    pub const SET_PRECHARGE_VOLTAGE: u8 = 0xBB;
    /// Set the COM deselect voltage level (VCOMH).
    pub const SET_VCOMH: u8 = 0xBE;
    /// Set the segment output contrast current.
    pub const SET_CONTRAST_CURRENT: u8 = 0xC1;
    /// Set the master current scale factor.
    pub const SET_MASTER_CURRENT: u8 = 0xC7;
    /// Set the multiplex ratio, encoded as the number of active COM lines minus one.
    pub const SET_MUX_RATIO: u8 = 0xCA;
    /// Display enhancement B: driving scheme capability.
    pub const SET_DISPLAY_ENHANCEMENT_B: u8 = 0xD1;
    /// Lock or unlock the command interface.
    pub const SET_COMMAND_LOCK: u8 = 0xFD;
}

/// Single-byte commands the driver sends directly, outside the init sequence and frame writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Control sleep mode. `true` turns the display off, `false` turns it back on.
    SetSleepMode(bool),
}

impl Command {
    /// The opcode and argument bytes for this command.
    pub fn encode(self) -> (u8, &'static [u8]) {
        match self {
            Command::SetSleepMode(ena) => (
                match ena {
                    true => opcode::SLEEP_MODE_ON,
                    false => opcode::SLEEP_MODE_OFF,
                },
                &[],
            ),
        }
    }
}
