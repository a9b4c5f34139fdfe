//! Line reassembly for fragmented link input
//!
//! UART reads and BLE notifications hand over whatever bytes happen to be
//! available. The assembler collects them until a line terminator (`\n` or
//! `\r`) and yields complete lines with the terminator stripped.

use heapless::Vec;

/// Longest accepted line, excluding the terminator
pub const MAX_LINE_LEN: usize = 64;

/// A complete message line
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// Errors that can occur while assembling lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`]; the partial line was discarded
    Overflow,
}

/// Collects bytes into terminator-delimited lines
#[derive(Debug, Clone, Default)]
pub struct LineAssembler {
    buffer: Line,
    /// Set after an overflow; bytes are dropped until the next terminator
    discarding: bool,
}

impl LineAssembler {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }

    /// Returns true if bytes are waiting for a terminator
    pub fn has_partial(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty
    /// line, `Ok(None)` when more bytes are needed, or `Err` when the
    /// line grew past [`MAX_LINE_LEN`].
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        match byte {
            b'\n' | b'\r' => {
                self.discarding = false;
                Ok(self.take())
            }
            // NUL padding from fixed-size sender buffers
            0 => Ok(None),
            _ if self.discarding => Ok(None),
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    self.discarding = true;
                    return Err(LineError::Overflow);
                }
                Ok(None)
            }
        }
    }

    /// Take the partial line as if it had been terminated
    pub fn flush(&mut self) -> Option<Line> {
        self.discarding = false;
        self.take()
    }

    fn take(&mut self) -> Option<Line> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(core::mem::take(&mut self.buffer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(asm: &mut LineAssembler, bytes: &[u8]) -> std::vec::Vec<Line> {
        bytes
            .iter()
            .filter_map(|&b| asm.feed(b).ok().flatten())
            .collect()
    }

    #[test]
    fn test_single_line() {
        let mut asm = LineAssembler::new();
        let lines = feed_all(&mut asm, b"00:01\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_slice(), b"00:01");
        assert!(!asm.has_partial());
    }

    #[test]
    fn test_fragmented_line() {
        let mut asm = LineAssembler::new();
        assert!(feed_all(&mut asm, b"00").is_empty());
        assert!(asm.has_partial());
        assert!(feed_all(&mut asm, b":0").is_empty());
        let lines = feed_all(&mut asm, b"1\n");
        assert_eq!(lines[0].as_slice(), b"00:01");
    }

    #[test]
    fn test_multiple_lines_and_crlf() {
        let mut asm = LineAssembler::new();
        let lines = feed_all(&mut asm, b"00:01\r\n99:00\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].as_slice(), b"00:01");
        assert_eq!(lines[1].as_slice(), b"99:00");
    }

    #[test]
    fn test_nul_bytes_ignored() {
        let mut asm = LineAssembler::new();
        let lines = feed_all(&mut asm, b"00:00\n\0\0\0");
        assert_eq!(lines.len(), 1);
        assert!(!asm.has_partial());
    }

    #[test]
    fn test_flush_partial() {
        let mut asm = LineAssembler::new();
        feed_all(&mut asm, b"mobi-ramp sensor");
        let line = asm.flush().unwrap();
        assert_eq!(line.as_slice(), b"mobi-ramp sensor");
        assert!(asm.flush().is_none());
    }

    #[test]
    fn test_overflow_discards_until_terminator() {
        let mut asm = LineAssembler::new();
        let mut overflowed = false;
        for _ in 0..MAX_LINE_LEN + 10 {
            if asm.feed(b'x') == Err(LineError::Overflow) {
                overflowed = true;
            }
        }
        assert!(overflowed);
        assert!(!asm.has_partial());

        // Tail of the long line is dropped, next line is intact
        let lines = feed_all(&mut asm, b"xx\n00:01\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_slice(), b"00:01");
    }
}
