//! The main API to the display driver. Construction builds the init sequence for the configured
//! panel and hands it to the bus display; afterwards the driver only switches the panel between
//! sleep and normal operation.

use embedded_hal as hal;
use log::debug;

use crate::bus::{BusDisplayParams, DisplayBus, PanelFormat};
use crate::command::Command;
use crate::config::Config;
use crate::error::Error;
use crate::init::InitSequence;

/// Whether the panel is driving its pixels or sleeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    Awake,
    Asleep,
}

/// Pulse the active-low /RESET line of the panel so that it starts from power-on defaults before
/// a driver is constructed. The driver does not own this pin.
pub fn hard_reset<RST, DELAY>(rst: &mut RST, delay: &mut DELAY) -> Result<(), Error>
where
    RST: hal::digital::v2::OutputPin,
    DELAY: hal::blocking::delay::DelayMs<u8>,
{
    rst.set_low().map_err(|_| Error::Transport)?;
    delay.delay_ms(10);
    rst.set_high().map_err(|_| Error::Transport)?;
    delay.delay_ms(10);
    Ok(())
}

/// A driver for an SSD1322 display sitting on a bus display `B`.
pub struct Ssd1322<B> {
    bus: B,
    power: PowerState,
}

impl<B> Ssd1322<B>
where
    B: DisplayBus,
{
    /// Construct a driver for the panel described by `config`, setting up the bus display with
    /// the patched init sequence and the SSD1322 pixel format. Only the active height is checked
    /// here; whether the window fits its RAM is up to the bus display.
    ///
    /// The init sequence ends by switching the display on, so the driver starts out awake. This
    /// assumes the panel was freshly reset (see `hard_reset`), as the sequence is written for a
    /// controller in its power-on state.
    pub fn new(mut bus: B, config: Config) -> Result<Self, Error> {
        let init_sequence = InitSequence::for_geometry(config.geometry())?;
        let format = PanelFormat::ssd1322(&config);
        debug!(
            "ssd1322: {:?}, mux ratio {:#04x}",
            config.geometry(),
            init_sequence.mux_ratio()
        );
        bus.setup(BusDisplayParams {
            init_sequence,
            format,
        })?;
        Ok(Ssd1322 {
            bus,
            power: PowerState::Awake,
        })
    }

    /// `true` while the display is active, `false` in sleep mode.
    pub fn is_awake(&self) -> bool {
        self.power == PowerState::Awake
    }

    /// The power state the driver last put the panel in.
    pub fn power_state(&self) -> PowerState {
        self.power
    }

    /// Put the display into sleep mode. The panel draws under 10uA asleep and keeps its RAM
    /// contents and operating mode, and the RAM can still be written. Does nothing if already
    /// asleep.
    pub fn sleep(&mut self) -> Result<(), Error> {
        if self.power == PowerState::Awake {
            self.set_sleep_mode(true)?;
            self.power = PowerState::Asleep;
            debug!("ssd1322: asleep");
        }
        Ok(())
    }

    /// Wake the display from sleep mode. Does nothing if already awake.
    pub fn wake(&mut self) -> Result<(), Error> {
        if self.power == PowerState::Asleep {
            self.set_sleep_mode(false)?;
            self.power = PowerState::Awake;
            debug!("ssd1322: awake");
        }
        Ok(())
    }

    /// The bus display, for streaming frames.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give back the bus display.
    pub fn release(self) -> B {
        self.bus
    }

    fn set_sleep_mode(&mut self, enabled: bool) -> Result<(), Error> {
        let (cmd, args) = Command::SetSleepMode(enabled).encode();
        self.bus.send(cmd, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::test_spy::SpyBus;
    use crate::bus::FourWire;
    use crate::config::Rotation;
    use crate::error::ConfigError;
    use crate::init::MUX_RATIO_OFFSET;
    use crate::interface::test_spy::{sends, TestSpyInterface};
    use core::convert::Infallible;
    use std::vec::Vec;

    fn display() -> Ssd1322<SpyBus> {
        Ssd1322::new(SpyBus::new(), Config::new(256, 64)).unwrap()
    }

    #[test]
    fn new_sets_up_bus() {
        let mut disp = Ssd1322::new(
            SpyBus::new(),
            Config::new(256, 64).column_offset(112),
        )
        .unwrap();
        assert!(disp.is_awake());
        assert_eq!(disp.power_state(), PowerState::Awake);
        let bus = disp.bus_mut();
        assert!(bus.sent.is_empty());
        assert_eq!(bus.setups.len(), 1);
        let params = &bus.setups[0];
        assert_eq!(params.init_sequence.as_bytes()[MUX_RATIO_OFFSET], 63);
        assert_eq!(
            params.format,
            PanelFormat::ssd1322(&Config::new(256, 64).column_offset(112))
        );
    }

    #[test]
    fn new_patches_rotated_height() {
        let disp = Ssd1322::new(
            SpyBus::new(),
            Config::new(64, 256).rotation(Rotation::Deg90),
        )
        .unwrap();
        let bus = disp.release();
        assert_eq!(bus.setups[0].init_sequence.mux_ratio(), 63);
    }

    #[test]
    fn new_rejects_active_height() {
        let result = Ssd1322::new(SpyBus::new(), Config::new(256, 128));
        assert_eq!(
            result.err(),
            Some(Error::Config(ConfigError::ActiveHeight(128)))
        );
        let result = Ssd1322::new(SpyBus::new(), Config::new(256, 0));
        assert_eq!(
            result.err(),
            Some(Error::Config(ConfigError::ActiveHeight(0)))
        );
    }

    #[test]
    fn new_leaves_window_to_bus() {
        for cfg in [
            Config::new(250, 64),
            Config::new(130, 16),
            Config::new(256, 64).column_offset(240),
        ] {
            let disp = Ssd1322::new(SpyBus::new(), cfg).unwrap();
            assert!(disp.is_awake());
            assert_eq!(disp.release().setups[0].format.geometry, *cfg.geometry());
        }

        let di = TestSpyInterface::new();
        let result = Ssd1322::new(FourWire::new(di.split()), Config::new(250, 64));
        assert_eq!(result.err(), Some(Error::Config(ConfigError::Window)));
        assert!(di.sent().is_empty());
    }

    #[test]
    fn new_transport_failure() {
        let mut bus = SpyBus::new();
        bus.failing = true;
        let result = Ssd1322::new(bus, Config::new(256, 64));
        assert_eq!(result.err(), Some(Error::Transport));
    }

    #[test]
    fn sleep_twice_sends_once() {
        let mut disp = display();
        disp.sleep().unwrap();
        disp.sleep().unwrap();
        assert!(!disp.is_awake());
        assert_eq!(disp.bus_mut().sent, [(0xAEu8, Vec::<u8>::new())]);
    }

    #[test]
    fn wake_when_awake_is_noop() {
        let mut disp = display();
        disp.wake().unwrap();
        assert!(disp.is_awake());
        assert!(disp.bus_mut().sent.is_empty());
    }

    #[test]
    fn sleep_wake_sleep() {
        let mut disp = display();
        disp.sleep().unwrap();
        disp.wake().unwrap();
        disp.sleep().unwrap();
        assert!(!disp.is_awake());
        assert_eq!(disp.power_state(), PowerState::Asleep);
        assert_eq!(disp.bus_mut().commands(), [0xAE, 0xAF, 0xAE]);
    }

    #[test]
    fn failed_sleep_keeps_state() {
        let mut disp = display();
        disp.bus_mut().failing = true;
        assert_eq!(disp.sleep(), Err(Error::Transport));
        assert!(disp.is_awake());

        disp.bus_mut().failing = false;
        disp.sleep().unwrap();
        disp.bus_mut().failing = true;
        assert_eq!(disp.wake(), Err(Error::Transport));
        assert!(!disp.is_awake());
        assert_eq!(disp.bus_mut().commands(), [0xAE]);
    }

    #[test]
    fn sleep_over_four_wire() {
        let mut di = TestSpyInterface::new();
        let mut disp = Ssd1322::new(FourWire::new(di.split()), Config::new(256, 64)).unwrap();
        di.clear();
        disp.sleep().unwrap();
        disp.wake().unwrap();
        di.check_multi(sends!(0xAE, 0xAF));
    }

    struct Pin<'a>(&'a mut Vec<&'static str>);

    impl<'a> hal::digital::v2::OutputPin for Pin<'a> {
        type Error = Infallible;
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.push("low");
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.push("high");
            Ok(())
        }
    }

    struct Delay(Vec<u8>);

    impl hal::blocking::delay::DelayMs<u8> for Delay {
        fn delay_ms(&mut self, ms: u8) {
            self.0.push(ms);
        }
    }

    #[test]
    fn reset_pulse() {
        let mut levels = Vec::new();
        let mut delay = Delay(Vec::new());
        hard_reset(&mut Pin(&mut levels), &mut delay).unwrap();
        assert_eq!(levels, ["low", "high"]);
        assert_eq!(delay.0, [10, 10]);
    }
}
