//! Screen painter
//!
//! Paints a [`Screen`] with the 6x10 mono font. Highlighted regions are
//! drawn with foreground and background swapped.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::screen::Screen;

/// Glyph cell width (px)
pub const CHAR_WIDTH: i32 = 6;

/// Glyph cell height (px)
pub const ROW_HEIGHT: i32 = 10;

fn style(inverted: bool) -> MonoTextStyle<'static, BinaryColor> {
    let (fg, bg) = if inverted {
        (BinaryColor::Off, BinaryColor::On)
    } else {
        (BinaryColor::On, BinaryColor::Off)
    };
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(fg)
        .background_color(bg)
        .build()
}

/// Paint the whole screen, clearing the target first
pub fn draw<D>(screen: &Screen, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    for (row, (line, inverted)) in screen.rows().enumerate() {
        if line.is_empty() {
            continue;
        }
        let len = line.len();
        let (start, end) = inverted.map_or((len, len), |span| span.clip(len));

        let y = row as i32 * ROW_HEIGHT;
        for (from, to, inverted) in [(0, start, false), (start, end, true), (end, len, false)] {
            let Some(segment) = line.get(from..to) else {
                continue;
            };
            if segment.is_empty() {
                continue;
            }
            Text::with_baseline(
                segment,
                Point::new(from as i32 * CHAR_WIDTH, y),
                style(inverted),
                Baseline::Top,
            )
            .draw(target)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_graphics::Pixel;

    const WIDTH: usize = 128;
    const HEIGHT: usize = 64;

    struct Frame {
        pixels: [[bool; WIDTH]; HEIGHT],
    }

    impl Frame {
        fn new() -> Self {
            Self {
                pixels: [[false; WIDTH]; HEIGHT],
            }
        }

        /// Bottom pixel row of a glyph cell, below every digit and letter
        /// without a descender
        fn cell_floor(&self, row: usize, col: usize) -> bool {
            self.pixels[row * ROW_HEIGHT as usize + 9][col * CHAR_WIDTH as usize]
        }
    }

    impl OriginDimensions for Frame {
        fn size(&self) -> Size {
            Size::new(WIDTH as u32, HEIGHT as u32)
        }
    }

    impl DrawTarget for Frame {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if (0..WIDTH as i32).contains(&point.x) && (0..HEIGHT as i32).contains(&point.y) {
                    self.pixels[point.y as usize][point.x as usize] = color.is_on();
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_highlight_fills_background() {
        let mut screen = Screen::new();
        screen.set_line(2, " Pause: 10");
        screen.set_line(3, " Impulse: 130");
        screen.set_highlight(2, 0, 10);

        let mut frame = Frame::new();
        draw(&screen, &mut frame).unwrap();

        assert!(frame.cell_floor(2, 0));
        assert!(frame.cell_floor(2, 8));
        assert!(!frame.cell_floor(3, 0));
        assert!(!frame.cell_floor(3, 10));
    }

    #[test]
    fn test_partial_highlight_leaves_value_plain() {
        let mut screen = Screen::new();
        screen.set_line(2, " Pause: 10");
        screen.set_highlight(2, 0, 8);

        let mut frame = Frame::new();
        draw(&screen, &mut frame).unwrap();

        assert!(frame.cell_floor(2, 7));
        assert!(!frame.cell_floor(2, 8));
        assert!(!frame.cell_floor(2, 9));
    }

    #[test]
    fn test_draw_clears_previous_frame() {
        let mut frame = Frame::new();
        frame.pixels[HEIGHT - 1][WIDTH - 1] = true;

        draw(&Screen::new(), &mut frame).unwrap();

        assert!(frame.pixels.iter().flatten().all(|on| !on));
    }
}
