//! Shared runtime pieces: configuration and the pager sink used for history output

pub mod config;

use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter feeding the minus pager
///
/// `log` and `global-log` write through this when stdout is a terminal.
/// Blob contents never pass through here, only formatted history text, so
/// invalid UTF-8 is an error; a multi-byte character split across two
/// `write` calls is held back until its tail arrives.
pub struct PagerWriter {
    pager: Pager,
    pending: Vec<u8>,
}

impl PagerWriter {
    pub fn new(pager: Pager) -> Self {
        PagerWriter {
            pager,
            pending: Vec::new(),
        }
    }
}

/// Drain the longest valid UTF-8 prefix of `pending`
fn take_complete(pending: &mut Vec<u8>) -> io::Result<String> {
    let valid = match std::str::from_utf8(pending) {
        Ok(_) => pending.len(),
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
    };

    let tail = pending.split_off(valid);
    let complete = std::mem::replace(pending, tail);

    // validated above
    String::from_utf8(complete).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        let text = take_complete(&mut self.pending)?;
        if !text.is_empty() {
            self.pager.push_str(text).map_err(io::Error::other)?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "incomplete UTF-8 sequence at end of pager output",
            ));
        }

        Ok(())
    }
}
