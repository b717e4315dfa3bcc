//! Status screen layout

use core::fmt::Write;

use heapless::String;
use spotweld_core::{PanelView, Parameter};

use crate::screen::{Screen, SCREEN_COLS};

/// Header title, followed by the status label
pub const TITLE: &str = "SPOT WELDER ";

/// Row of the first parameter entry
pub const FIRST_ENTRY_ROW: usize = 2;

/// Lay out the welder status
pub fn compose(view: &PanelView) -> Screen {
    let mut screen = Screen::new();

    let mut header: String<SCREEN_COLS> = String::new();
    let _ = header.push_str(TITLE);
    let _ = header.push_str(view.status.label());
    screen.set_line(0, &header);

    for (i, parameter) in Parameter::ALL.into_iter().enumerate() {
        let row = FIRST_ENTRY_ROW + i;

        let mut line: String<SCREEN_COLS> = String::new();
        let _ = write!(line, " {}: ", parameter.name());
        let value_col = line.len() as u8;
        let _ = write!(line, "{}", view.values[i]);
        screen.set_line(row, &line);

        if parameter == view.selected {
            // Inverting the value field a second time cancels the row
            // highlight over it
            let end_col = if view.editing && view.blink {
                value_col
            } else {
                line.len() as u8
            };
            screen.set_highlight(row, 0, end_col);
        }
    }

    screen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Span;
    use spotweld_core::Status;

    fn view() -> PanelView {
        PanelView {
            status: Status::Ready,
            values: [30, 10, 130],
            selected: Parameter::PreImpulse,
            editing: false,
            blink: false,
        }
    }

    #[test]
    fn test_header_and_entries() {
        let screen = compose(&view());
        assert_eq!(screen.line(0), Some("SPOT WELDER READY"));
        assert_eq!(screen.line(1), Some(""));
        assert_eq!(screen.line(2), Some(" Pre-impulse: 30"));
        assert_eq!(screen.line(3), Some(" Pause: 10"));
        assert_eq!(screen.line(4), Some(" Impulse: 130"));
    }

    #[test]
    fn test_selected_row_inverted() {
        let screen = compose(&PanelView {
            selected: Parameter::Impulse,
            ..view()
        });
        assert_eq!(screen.highlight(2), None);
        assert_eq!(screen.highlight(3), None);
        assert_eq!(screen.highlight(4), Some(Span { start: 0, end: 13 }));
    }

    #[test]
    fn test_blink_cursor_only_when_editing_and_phase_on() {
        let editing_on = compose(&PanelView {
            editing: true,
            blink: true,
            ..view()
        });
        // " Pre-impulse: " is 14 columns
        assert_eq!(editing_on.highlight(2), Some(Span { start: 0, end: 14 }));

        let editing_off = compose(&PanelView {
            editing: true,
            blink: false,
            ..view()
        });
        assert_eq!(editing_off.highlight(2), Some(Span { start: 0, end: 16 }));

        let not_editing = compose(&PanelView {
            editing: false,
            blink: true,
            ..view()
        });
        assert_eq!(not_editing.highlight(2), Some(Span { start: 0, end: 16 }));
    }

    #[test]
    fn test_status_labels() {
        let screen = compose(&PanelView {
            status: Status::Firing(Parameter::Impulse),
            ..view()
        });
        assert_eq!(screen.line(0), Some("SPOT WELDER ZAPP IMP"));

        let screen = compose(&PanelView {
            status: Status::Cooling,
            ..view()
        });
        assert_eq!(screen.line(0), Some("SPOT WELDER COOLING"));
    }
}
