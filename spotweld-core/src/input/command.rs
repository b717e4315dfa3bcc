//! Single-byte command channel
//!
//! ```text
//! '1' '2' '3'  select parameter (leaves edit mode)
//! 'i'          selected value += 10
//! 'd'          selected value -= 10
//! 'e'          toggle edit mode
//! '!'          arm / fire
//! ```
//!
//! Any other byte is ignored. Only the first byte of each received burst
//! is acted on; the rest of the burst is discarded.

use embedded_io::ReadReady;
use embedded_io_async::Read;

use super::event::UiEvent;
use crate::config::COMMAND_STEP;
use crate::params::Parameter;

/// Receive buffer for one burst
const BURST_BUF_SIZE: usize = 32;

/// Decode one command byte
pub fn decode_command(byte: u8) -> Option<UiEvent> {
    match byte {
        b'1'..=b'3' => Parameter::from_index((byte - b'1') as usize).map(UiEvent::Select),
        b'i' => Some(UiEvent::Adjust(COMMAND_STEP)),
        b'd' => Some(UiEvent::Adjust(-COMMAND_STEP)),
        b'e' => Some(UiEvent::ToggleEdit),
        b'!' => Some(UiEvent::Arm),
        _ => None,
    }
}

/// Command reader over a byte stream
pub struct CommandReader<R> {
    rx: R,
    buf: [u8; BURST_BUF_SIZE],
}

impl<R: Read + ReadReady> CommandReader<R> {
    pub fn new(rx: R) -> Self {
        Self {
            rx,
            buf: [0; BURST_BUF_SIZE],
        }
    }

    /// Wait for the next burst and decode its first byte
    ///
    /// Returns the raw byte alongside the decoded event so callers can
    /// log ignored input. `Ok(None)` means the stream reached its end.
    pub async fn next(&mut self) -> Result<Option<(u8, Option<UiEvent>)>, R::Error> {
        let n = self.rx.read(&mut self.buf).await?;
        if n == 0 {
            return Ok(None);
        }
        let byte = self.buf[0];
        self.flush().await?;
        Ok(Some((byte, decode_command(byte))))
    }

    /// Discard everything already buffered by the transport
    async fn flush(&mut self) -> Result<(), R::Error> {
        while self.rx.read_ready()? {
            if self.rx.read(&mut self.buf).await? == 0 {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use embedded_io_async::ErrorType;

    /// Transport delivering scripted bursts. The next `ready_bursts`
    /// bursts count as already buffered when a flush checks for data.
    struct ScriptedRx<'a> {
        bursts: &'a [&'a [u8]],
        next: usize,
        ready_bursts: usize,
    }

    impl<'a> ScriptedRx<'a> {
        /// Each burst arrives after the previous one was handled
        fn separate(bursts: &'a [&'a [u8]]) -> Self {
            Self {
                bursts,
                next: 0,
                ready_bursts: 0,
            }
        }
    }

    impl ErrorType for ScriptedRx<'_> {
        type Error = Infallible;
    }

    impl Read for ScriptedRx<'_> {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let Some(burst) = self.bursts.get(self.next) else {
                return Ok(0);
            };
            self.next += 1;
            let n = burst.len().min(buf.len());
            buf[..n].copy_from_slice(&burst[..n]);
            Ok(n)
        }
    }

    impl ReadReady for ScriptedRx<'_> {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            if self.ready_bursts > 0 && self.next < self.bursts.len() {
                self.ready_bursts -= 1;
                return Ok(true);
            }
            Ok(false)
        }
    }

    fn collect(rx: ScriptedRx<'_>) -> heapless::Vec<(u8, Option<UiEvent>), 16> {
        let mut reader = CommandReader::new(rx);
        let mut out = heapless::Vec::new();
        block_on(async {
            while let Ok(Some(item)) = reader.next().await {
                out.push(item).unwrap();
            }
        });
        out
    }

    #[test]
    fn test_decode_commands() {
        assert_eq!(decode_command(b'1'), Some(UiEvent::Select(Parameter::PreImpulse)));
        assert_eq!(decode_command(b'2'), Some(UiEvent::Select(Parameter::Pause)));
        assert_eq!(decode_command(b'3'), Some(UiEvent::Select(Parameter::Impulse)));
        assert_eq!(decode_command(b'i'), Some(UiEvent::Adjust(10)));
        assert_eq!(decode_command(b'd'), Some(UiEvent::Adjust(-10)));
        assert_eq!(decode_command(b'e'), Some(UiEvent::ToggleEdit));
        assert_eq!(decode_command(b'!'), Some(UiEvent::Arm));
    }

    #[test]
    fn test_unknown_bytes_ignored() {
        for byte in [b'0', b'4', b'I', b'D', b'E', b' ', b'\n', 0x00, 0xFF] {
            assert_eq!(decode_command(byte), None);
        }
    }

    #[test]
    fn test_first_byte_of_burst_wins() {
        let bursts: [&[u8]; 2] = [b"2iii", b"e"];
        let out = collect(ScriptedRx::separate(&bursts));
        assert_eq!(
            out.as_slice(),
            &[
                (b'2', Some(UiEvent::Select(Parameter::Pause))),
                (b'e', Some(UiEvent::ToggleEdit)),
            ]
        );
    }

    #[test]
    fn test_flush_drains_buffered_bursts() {
        let bursts: [&[u8]; 3] = [b"!", b"!", b"!"];
        let rx = ScriptedRx {
            bursts: &bursts,
            next: 0,
            ready_bursts: 2,
        };
        let out = collect(rx);
        assert_eq!(out.as_slice(), &[(b'!', Some(UiEvent::Arm))]);
    }

    #[test]
    fn test_ignored_byte_still_reported() {
        let bursts: [&[u8]; 1] = [b"x"];
        let out = collect(ScriptedRx::separate(&bursts));
        assert_eq!(out.as_slice(), &[(b'x', None)]);
    }
}
