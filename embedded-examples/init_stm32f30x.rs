//! Full example code for bringing up an SSD1322 display and cycling its power state. This runs on
//! an STM32F303RE, using a Newhaven Displays NHD-3.12-25664UCY2 connected to SPI1, PA8 for D/C,
//! and PA9 for /RESET.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate cortex_m;
extern crate embedded_hal as hal_api;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;
extern crate panic_abort;
extern crate ssd1322_busdisplay;

use cortex_m::asm;
use hal_api::blocking::delay::DelayMs;
use cortex_m_rt::ExceptionFrame;
use hal::prelude::*;
use hal::spi;
use ssd1322_busdisplay as oled;

entry!(main);

exception!(*, default_handler);
exception!(HardFault, hard_fault);

fn hard_fault(_ef: &ExceptionFrame) -> ! {
    asm::bkpt();
    loop {}
}

fn default_handler(_irqn: i16) {
    loop {}
}

fn main() -> ! {
    // Get peripherals and set up RCC.
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let mut delay = hal::delay::Delay::new(cp.SYST, clocks);

    // Get GPIO A where the display is connected.
    let mut gpioa = dp.GPIOA.split(&mut rcc.ahb);

    // Set up SPI1, which is Alternate Function 5 for GPIOs PA5,6,7.
    let disp_sck = gpioa.pa5.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let disp_miso = gpioa.pa6.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let disp_mosi = gpioa.pa7.into_af5(&mut gpioa.moder, &mut gpioa.afrl);

    let disp_spi = spi::Spi::spi1(
        dp.SPI1,
        (disp_sck, disp_miso, disp_mosi),
        hal_api::spi::Mode {
            polarity: hal_api::spi::Polarity::IdleLow,
            phase: hal_api::spi::Phase::CaptureOnFirstTransition,
        },
        8.mhz(),
        clocks,
        &mut rcc.apb2,
    );

    // PA8 will be the D/C push-pull output for the 4th wire.
    let disp_dc = gpioa
        .pa8
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    // PA9 is the display's /RESET pin. The driver does not own this pin; pulse it before
    // construction so the init sequence starts from power-on defaults.
    let mut disp_rst = gpioa
        .pa9
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);
    oled::controller::hard_reset(&mut disp_rst, &mut delay).unwrap();

    // The NHD-3.12-25664UCY2 wires its 256 pixel columns to segments 112 through 367.
    let mut disp = oled::Ssd1322::new(
        oled::FourWire::new(oled::SpiInterface::new(disp_spi, disp_dc)),
        oled::Config::new(256, 64).column_offset(112),
    ).unwrap();

    // Clear the panel by writing an all-black frame.
    let frame = [0u8; 256 * 64 / 2];
    disp.bus_mut().write_frame(&frame).unwrap();

    // Blink the panel by putting it to sleep and waking it.
    loop {
        delay.delay_ms(1000_u16);
        disp.sleep().unwrap();
        delay.delay_ms(1000_u16);
        disp.wake().unwrap();
    }
}
