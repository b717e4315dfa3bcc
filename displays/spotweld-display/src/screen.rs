//! Screen buffer types
//!
//! Character grid sized for a 128x64 panel with a 6x10 font. Each row
//! carries at most one inverted column span.

use heapless::String;

/// Number of character rows
pub const SCREEN_ROWS: usize = 6;

/// Number of character columns
pub const SCREEN_COLS: usize = 21;

/// Half-open column range drawn inverted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Span {
    pub start: u8,
    pub end: u8,
}

impl Span {
    /// Span over `start..end`, `None` if empty
    pub fn new(start: u8, end: u8) -> Option<Self> {
        let end = end.min(SCREEN_COLS as u8);
        (start < end).then_some(Self { start, end })
    }

    /// Clip to a row of `len` characters
    pub fn clip(self, len: usize) -> (usize, usize) {
        ((self.start as usize).min(len), (self.end as usize).min(len))
    }
}

/// One row of text with its optional inverted span
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Row {
    text: String<SCREEN_COLS>,
    inverted: Option<Span>,
}

/// Text-mode frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    rows: [Row; SCREEN_ROWS],
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a row's text, truncated to the screen width
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(row) = self.rows.get_mut(row) else {
            return;
        };
        row.text.clear();
        for ch in text.chars() {
            if row.text.push(ch).is_err() {
                break;
            }
        }
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.rows.get(row).map(|r| r.text.as_str())
    }

    /// Invert `start..end` on a row; an empty range clears it
    pub fn set_highlight(&mut self, row: usize, start: u8, end: u8) {
        if let Some(row) = self.rows.get_mut(row) {
            row.inverted = Span::new(start, end);
        }
    }

    pub fn highlight(&self, row: usize) -> Option<Span> {
        self.rows.get(row).and_then(|r| r.inverted)
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = (&str, Option<Span>)> {
        self.rows.iter().map(|r| (r.text.as_str(), r.inverted))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, (text, _)) in self.rows().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", text);
        }
        defmt::write!(f, "]");
    }
}
