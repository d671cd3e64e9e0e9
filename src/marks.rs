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

//! The mark table: 26 named line markers, `'a` through `'z`, set with `k`
//! and dereferenced with `'x` as an address.

use crate::buffer::Handle;
use crate::error::EdError;

pub struct MarkTable {
    slots: [Option<Handle>; 26],
}

impl MarkTable {
    pub fn new() -> Self {
        MarkTable { slots: [None; 26] }
    }

    fn index(c: char) -> Result<usize, EdError> {
        if c.is_ascii_lowercase() {
            Ok(c as usize - 'a' as usize)
        } else {
            Err(EdError::InvalidMarkCharacter)
        }
    }

    pub fn set(&mut self, c: char, h: Handle) -> Result<(), EdError> {
        let i = Self::index(c)?;
        self.slots[i] = Some(h);
        Ok(())
    }

    pub fn get(&self, c: char) -> Result<Handle, EdError> {
        let i = Self::index(c)?;
        self.slots[i].ok_or(EdError::InvalidMarkCharacter)
    }

    /// Drops every mark pointing at `h`; called whenever `h` leaves the
    /// buffer (delete, or being replaced by change/substitute) so a stale
    /// mark can never resolve to a handle that no longer denotes a line.
    pub fn clear_references_to(&mut self, h: Handle) {
        for slot in &mut self.slots {
            if *slot == Some(h) {
                *slot = None;
            }
        }
    }

    pub fn clear_all(&mut self) {
        self.slots = [None; 26];
    }

    /// Validates a mark-character byte read from input. A literal newline
    /// in the mark-character position (e.g. a truncated `'` at end of
    /// line) is rejected rather than silently treated as some other
    /// character.
    pub fn read_mark_char(c: char) -> Result<char, EdError> {
        if c == '\n' || !c.is_ascii_lowercase() {
            Err(EdError::InvalidMarkCharacter)
        } else {
            Ok(c)
        }
    }
}

impl Default for MarkTable {
    fn default() -> Self {
        Self::new()
    }
}
