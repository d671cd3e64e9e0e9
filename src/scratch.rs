// rust-ed - Memory-safe replacement for GNU ed
// Copyright (C) 2025 Brian Boynton, MD
//
// This file is part of rust-ed.
//
// rust-ed is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// rust-ed is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with rust-ed.  If not, see <https://www.gnu.org/licenses/>.

//! Append-only scratch store backing line text.
//!
//! Every line in the buffer is a `(offset, len)` pair into this file rather
//! than an owned `String`; appending is O(1) and undo only has to remember
//! offsets, never copy bytes. Nothing is ever overwritten in place: `put`
//! always appends at the current end of file and returns a fresh span, even
//! when the text is byte-identical to something already stored.

use crate::error::EdError;
use std::io::{Read, Seek, SeekFrom, Write};

/// A span of bytes in the scratch file. `len == 0` denotes an empty line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: u64,
    pub len: u32,
}

pub struct ScratchStore {
    file: std::fs::File,
    end: u64,
}

impl ScratchStore {
    pub fn new() -> Result<Self, EdError> {
        let file = tempfile::tempfile().map_err(|e| EdError::IoError(e.to_string(), "scratch file"))?;
        log::trace!("scratch store opened");
        Ok(ScratchStore { file, end: 0 })
    }

    /// Appends `text` (without its trailing newline) to the store and
    /// returns the span recording where it landed.
    pub fn put(&mut self, text: &[u8]) -> Result<Span, EdError> {
        if text.len() > u32::MAX as usize {
            return Err(EdError::LineTooLong);
        }
        self.file
            .seek(SeekFrom::Start(self.end))
            .map_err(|e| EdError::IoError(e.to_string(), "scratch file"))?;
        self.file
            .write_all(text)
            .map_err(|e| EdError::IoError(e.to_string(), "scratch file"))?;
        let span = Span { offset: self.end, len: text.len() as u32 };
        self.end += text.len() as u64;
        Ok(span)
    }

    /// Reads the bytes for `span` back out of the store.
    pub fn get(&mut self, span: Span) -> Result<Vec<u8>, EdError> {
        let mut buf = vec![0u8; span.len as usize];
        self.file
            .seek(SeekFrom::Start(span.offset))
            .map_err(|e| EdError::IoError(e.to_string(), "scratch file"))?;
        self.file
            .read_exact(&mut buf)
            .map_err(|e| EdError::IoError(e.to_string(), "scratch file"))?;
        Ok(buf)
    }

    pub fn get_string(&mut self, span: Span) -> Result<String, EdError> {
        let bytes = self.get(span)?;
        String::from_utf8(bytes).map_err(|_| EdError::Fatal("scratch store contained invalid utf-8"))
    }
}
