use anyhow::Result;
use std::collections::VecDeque;

/// Byte accumulator that reassembles newline-delimited frames from a
/// chunked transport.
///
/// Bytes stay buffered until a `\n` arrives, so a multi-byte UTF-8
/// sequence split across two network chunks is carried over intact
/// instead of decoding into replacement characters. After each call the
/// buffer holds at most one partial line: the tail after the last
/// newline.
pub struct LineBuffer {
    buffer: VecDeque<u8>,
}

impl LineBuffer {
    /// Create a new buffer with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a raw chunk from the transport
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Extract the next complete line, without its `\n` or `\r\n`
    /// terminator. Returns `None` while no full line is buffered.
    ///
    /// A complete line that is not valid UTF-8 comes back as an error;
    /// whether that is fatal is the caller's call.
    pub fn next_line(&mut self) -> Option<Result<String>> {
        let newline_pos = self.buffer.iter().position(|&b| b == b'\n')?;

        let line_bytes: Vec<u8> = self.buffer.drain(..=newline_pos).collect();

        match std::str::from_utf8(&line_bytes) {
            Ok(line_str) => Some(Ok(line_str
                .trim_end_matches(|c| c == '\r' || c == '\n')
                .to_string())),
            Err(e) => Some(Err(anyhow::anyhow!("invalid UTF-8 in stream line: {}", e))),
        }
    }

    /// Current buffer size
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_buffer_basic() {
        let mut buffer = LineBuffer::with_capacity(64);

        buffer.extend(b"line1\nline2\n");

        assert_eq!(buffer.next_line().unwrap().unwrap(), "line1");
        assert_eq!(buffer.next_line().unwrap().unwrap(), "line2");
        assert!(buffer.next_line().is_none());
    }

    #[test]
    fn test_partial_line_held_over() {
        let mut buffer = LineBuffer::with_capacity(64);

        buffer.extend(b"partial");
        assert!(buffer.next_line().is_none());
        assert_eq!(buffer.len(), 7);

        buffer.extend(b" line\n");
        assert_eq!(buffer.next_line().unwrap().unwrap(), "partial line");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_crlf_terminator_stripped() {
        let mut buffer = LineBuffer::with_capacity(64);

        buffer.extend(b"data: {}\r\n");
        assert_eq!(buffer.next_line().unwrap().unwrap(), "data: {}");
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let mut buffer = LineBuffer::with_capacity(64);
        let line = "data: 你好\n".as_bytes();

        // Split inside the first CJK character (3-byte sequence).
        buffer.extend(&line[..8]);
        assert!(buffer.next_line().is_none());

        buffer.extend(&line[8..]);
        assert_eq!(buffer.next_line().unwrap().unwrap(), "data: 你好");
    }

    #[test]
    fn test_invalid_utf8_line_is_recoverable() {
        let mut buffer = LineBuffer::with_capacity(64);

        buffer.extend(b"\xff\xfe\n");
        buffer.extend(b"ok\n");

        assert!(buffer.next_line().unwrap().is_err());
        assert_eq!(buffer.next_line().unwrap().unwrap(), "ok");
    }

    #[test]
    fn test_empty_line_is_emitted() {
        let mut buffer = LineBuffer::with_capacity(64);

        buffer.extend(b"\n");
        assert_eq!(buffer.next_line().unwrap().unwrap(), "");
    }
}
