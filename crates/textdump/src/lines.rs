// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use std::io::{BufRead, BufReader, Read};

use crate::EncodingMode;
use crate::read::TextdumpReaderError;

/// A forward-only line cursor over the dump, with room for exactly one line of lookahead.
///
/// Knows nothing about the grammar. Each line is handed out once, without its terminator
/// (`\n` or `\r\n`).
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    encoding_mode: EncodingMode,
    /// Number of lines handed out so far, i.e. the 1-based number of the last consumed line.
    line_num: usize,
    peeked: Option<String>,
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: BufReader<R>, encoding_mode: EncodingMode) -> Self {
        Self {
            reader,
            encoding_mode,
            line_num: 0,
            peeked: None,
        }
    }

    pub fn line_num(&self) -> usize {
        self.line_num
    }

    fn read_raw(&mut self) -> Result<String, TextdumpReaderError> {
        let expected = self.line_num + 1;
        let mut buf = Vec::new();
        let n = self
            .reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| TextdumpReaderError::IoError(e, expected))?;
        if n == 0 {
            return Err(TextdumpReaderError::StructuralError(
                "unexpected end of dump".to_string(),
                expected,
            ));
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        match self.encoding_mode {
            EncodingMode::ISO8859_1 => {
                // Every byte maps to the code point of the same value, C1 controls included.
                Ok(encoding_rs::mem::decode_latin1(&buf).into_owned())
            }
            EncodingMode::UTF8 => String::from_utf8(buf).map_err(|e| {
                TextdumpReaderError::FormatError(format!("invalid UTF-8: {e}"), expected)
            }),
        }
    }

    /// Consume the next line. Running out of input here is a structural error.
    pub fn next_line(&mut self) -> Result<String, TextdumpReaderError> {
        let line = match self.peeked.take() {
            Some(line) => line,
            None => self.read_raw()?,
        };
        self.line_num += 1;
        Ok(line)
    }

    /// Look at the next line without consuming it.
    pub fn peek_line(&mut self) -> Result<&str, TextdumpReaderError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.read_raw()?);
        }
        Ok(self.peeked.as_deref().unwrap_or_default())
    }
}
