use crate::error::Error;

/// A link to the controller that can write command and data bytes.
pub trait DisplayInterface {
    fn send_command(&mut self, cmd: u8) -> Result<(), Error>;
    fn send_data(&mut self, buf: &[u8]) -> Result<(), Error>;
}

pub mod spi {
    //! The SPI interface supports the "4-wire" interface of the driver, such that each word on the
    //! SPI bus is 8 bits. The "3-wire" mode replaces the D/C GPIO with a 9th bit on each word,
    //! which seems really awkward to implement with embedded_hal SPI.

    use embedded_hal as hal;

    use super::DisplayInterface;
    use crate::error::Error;

    pub struct SpiInterface<SPI, DC> {
        /// The SPI master device connected to the SSD1322.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin of the SSD1322 (the fourth
        /// "wire" of "4-wire" mode).
        dc: DC,
    }

    impl<SPI, DC> SpiInterface<SPI, DC>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: hal::digital::v2::OutputPin,
    {
        /// Create a new SPI interface to communicate with the display driver. `spi` is the SPI
        /// master device, and `dc` is the GPIO output pin connected to the D/C pin of the SSD1322.
        pub fn new(spi: SPI, dc: DC) -> Self {
            Self { spi, dc }
        }

        /// Give back the SPI device and D/C pin.
        pub fn release(self) -> (SPI, DC) {
            (self.spi, self.dc)
        }
    }

    impl<SPI, DC> DisplayInterface for SpiInterface<SPI, DC>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: hal::digital::v2::OutputPin,
    {
        fn send_command(&mut self, cmd: u8) -> Result<(), Error> {
            self.dc.set_low().map_err(|_| Error::Transport)?;
            self.spi.write(&[cmd]).map_err(|_| Error::Transport)?;
            self.dc.set_high().map_err(|_| Error::Transport)
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), Error> {
            self.dc.set_high().map_err(|_| Error::Transport)?;
            self.spi.write(buf).map_err(|_| Error::Transport)
        }
    }

}

#[cfg(test)]
pub mod test_spy {
    //! An interface for use in unit tests to spy on whatever was sent to it.

    use super::DisplayInterface;
    use crate::error::Error;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Clone, Debug, PartialEq)]
    pub enum Sent {
        Cmd(u8),
        Data(Vec<u8>),
    }

    #[derive(Default)]
    struct Spied {
        sent: Vec<Sent>,
        failing: bool,
    }

    /// Handles returned by `split` share what they record, so a test can keep one while the code
    /// under test owns another.
    #[derive(Default)]
    pub struct TestSpyInterface {
        spied: Rc<RefCell<Spied>>,
    }

    impl TestSpyInterface {
        pub fn new() -> Self {
            Self::default()
        }
        pub fn split(&self) -> Self {
            TestSpyInterface {
                spied: self.spied.clone(),
            }
        }
        pub fn check_multi(&self, expect: &[Sent]) {
            assert_eq!(self.spied.borrow().sent, expect);
        }
        pub fn sent(&self) -> Vec<Sent> {
            self.spied.borrow().sent.clone()
        }
        pub fn clear(&mut self) {
            self.spied.borrow_mut().sent.clear()
        }
        /// Make every later write fail as if the bus faulted.
        pub fn fail(&mut self) {
            self.spied.borrow_mut().failing = true
        }
        fn record(&self, sent: Sent) -> Result<(), Error> {
            let mut guard = self.spied.borrow_mut();
            let spied: &mut Spied = &mut guard;
            if spied.failing {
                return Err(Error::Transport);
            }
            // Consecutive data writes belong to the same command.
            match sent {
                Sent::Data(more) => match spied.sent.last_mut() {
                    Some(Sent::Data(prev)) => prev.extend(more),
                    _ => spied.sent.push(Sent::Data(more)),
                },
                cmd => spied.sent.push(cmd),
            }
            Ok(())
        }
    }

    impl DisplayInterface for TestSpyInterface {
        fn send_command(&mut self, cmd: u8) -> Result<(), Error> {
            self.record(Sent::Cmd(cmd))
        }
        fn send_data(&mut self, data: &[u8]) -> Result<(), Error> {
            self.record(Sent::Data(data.to_vec()))
        }
    }

    macro_rules! send {
        ([$($d:tt),*]) => {$crate::interface::test_spy::Sent::Data(vec![$($d,)*])};
        ($c:tt) => {$crate::interface::test_spy::Sent::Cmd($c)};
    }
    macro_rules! sends {
        ($($e:tt),*) => {&[$($crate::interface::test_spy::send!($e),)*]};
    }
    pub(crate) use {send, sends};
}
