//! SH1106 OLED Display Driver
//!
//! Driver for 128x64 SH1106-based OLED displays over 4-wire SPI.
//! Pixels are drawn into a page-organised frame buffer through
//! `embedded-graphics` and sent to the panel by `flush`.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::Pixel;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// Visible area starts at RAM column 2 (132-column controller)
const COLUMN_OFFSET: u8 = 2;

/// SH1106 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Power-up command sequence
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Sh1106Error {
    /// SPI transfer failed
    Bus,
    /// Control pin (DC, CS or RST) could not be driven
    Pin,
}

/// SH1106 OLED driver
pub struct Sh1106<SPI, DC, CS, RST> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
    /// Frame buffer (1 bit per pixel, LSB at the top of each page)
    buffer: [[u8; WIDTH]; PAGES],
}

impl<SPI, DC, CS, RST> Sh1106<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            buffer: [[0; WIDTH]; PAGES],
        }
    }

    /// Hardware reset, then the init sequence
    pub async fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Sh1106Error> {
        self.rst.set_low().map_err(|_| Sh1106Error::Pin)?;
        delay.delay_ms(10).await;
        self.rst.set_high().map_err(|_| Sh1106Error::Pin)?;
        delay.delay_ms(10).await;

        self.command(INIT_SEQUENCE).await
    }

    /// Send the frame buffer to the panel
    pub async fn flush(&mut self) -> Result<(), Sh1106Error> {
        for page in 0..PAGES {
            self.command(&[
                cmd::SET_PAGE_ADDR | page as u8,
                cmd::SET_LOW_COLUMN | (COLUMN_OFFSET & 0x0F),
                cmd::SET_HIGH_COLUMN | (COLUMN_OFFSET >> 4),
            ])
            .await?;

            self.dc.set_high().map_err(|_| Sh1106Error::Pin)?;
            self.cs.set_low().map_err(|_| Sh1106Error::Pin)?;
            let written = self.write_bus(page).await;
            self.cs.set_high().map_err(|_| Sh1106Error::Pin)?;
            written?;
        }
        Ok(())
    }

    async fn command(&mut self, bytes: &[u8]) -> Result<(), Sh1106Error> {
        self.dc.set_low().map_err(|_| Sh1106Error::Pin)?;
        self.cs.set_low().map_err(|_| Sh1106Error::Pin)?;
        let written = write_all(&mut self.spi, bytes).await;
        self.cs.set_high().map_err(|_| Sh1106Error::Pin)?;
        written
    }

    async fn write_bus(&mut self, page: usize) -> Result<(), Sh1106Error> {
        write_all(&mut self.spi, &self.buffer[page]).await
    }
}

async fn write_all<SPI: SpiBus>(spi: &mut SPI, bytes: &[u8]) -> Result<(), Sh1106Error> {
    spi.write(bytes).await.map_err(|_| Sh1106Error::Bus)?;
    spi.flush().await.map_err(|_| Sh1106Error::Bus)
}

impl<SPI, DC, CS, RST> OriginDimensions for Sh1106<SPI, DC, CS, RST> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<SPI, DC, CS, RST> DrawTarget for Sh1106<SPI, DC, CS, RST> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            let mask = 1 << (y % 8);
            let cell = &mut self.buffer[y / 8][x];
            if color.is_on() {
                *cell |= mask;
            } else {
                *cell &= !mask;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        for page in self.buffer.iter_mut() {
            page.fill(fill);
        }
        Ok(())
    }
}
