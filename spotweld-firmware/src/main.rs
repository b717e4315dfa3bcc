//! Spotweld - Spot Welder Controller Firmware
//!
//! Main firmware binary for RP2040-based spot welder controllers.
//! Drives a welding relay through a pre-impulse, pause and impulse
//! sequence, with parameters set from a rotary encoder or a serial
//! command channel and shown on an SH1106 OLED.
//!
//! Task priorities, highest first:
//! - sequencer: interrupt executor on SWI_IRQ_1
//! - display: interrupt executor on SWI_IRQ_0
//! - encoder and command input: thread-mode executor

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::config::CONFIG;
use crate::sh1106::Sh1106;

mod config;
mod sh1106;
mod shared;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Command channel baud rate
const COMMAND_BAUD: u32 = 9600;

/// OLED SPI clock
const OLED_SPI_HZ: u32 = 8_000_000;

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_MED: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LOW: StaticCell<Executor> = StaticCell::new();

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_0() {
    EXECUTOR_MED.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("Spotweld firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Welding relay, LOW until the sequencer takes over
    let relay = Output::new(p.PIN_13, Level::Low);

    // Rotary encoder (button reads HIGH when pressed)
    let enc_a = Input::new(p.PIN_2, Pull::Up);
    let enc_b = Input::new(p.PIN_3, Pull::Up);
    let enc_btn = Input::new(p.PIN_4, Pull::Down);

    // Foot switch, HIGH when pressed
    #[cfg(feature = "trigger-pin")]
    let trigger = Input::new(p.PIN_27, Pull::Down);

    // OLED on SPI0 (SCK=GPIO18, MOSI=GPIO19)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = OLED_SPI_HZ;
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, spi_config);
    let oled = Sh1106::new(
        spi,
        Output::new(p.PIN_16, Level::Low),  // DC
        Output::new(p.PIN_17, Level::High), // CS
        Output::new(p.PIN_20, Level::High), // RST
    );

    // Command channel on UART0 (TX=GPIO0, RX=GPIO1)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = COMMAND_BAUD;

    let tx_buf = TX_BUF.init([0u8; 16]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();
    info!("UART initialized for command channel");

    // Sequencer preempts everything else
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    spawner.spawn(unwrap!(tasks::sequencer_task(relay, CONFIG.sequencer)));

    interrupt::SWI_IRQ_0.set_priority(Priority::P3);
    let spawner = EXECUTOR_MED.start(interrupt::SWI_IRQ_0);
    spawner.spawn(unwrap!(tasks::display_task(oled, CONFIG.display)));

    let executor = EXECUTOR_LOW.init(Executor::new());
    executor.run(|spawner| {
        spawner.spawn(unwrap!(tasks::encoder_task(
            enc_a,
            enc_b,
            enc_btn,
            CONFIG.encoder
        )));
        spawner.spawn(unwrap!(tasks::command_task(rx)));
        #[cfg(feature = "trigger-pin")]
        spawner.spawn(unwrap!(tasks::trigger_task(trigger)));
        info!("All tasks spawned, firmware running");
    })
}
