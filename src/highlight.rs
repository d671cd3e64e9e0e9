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

//! Syntax highlighting is out of scope for the editor core (see
//! SPEC_FULL.md §1): `l`/`p`/`n` output goes through a [`Highlighter`] seam
//! so a caller embedding this crate can plug one in, but the editor itself
//! only ships the no-op passthrough.

pub trait Highlighter: Send + Sync {
    /// Returns `text` unmodified or decorated; the no-op implementation
    /// always returns it unchanged.
    fn highlight(&self, text: &str) -> String;
}

#[derive(Default)]
pub struct NoHighlighter;

impl Highlighter for NoHighlighter {
    fn highlight(&self, text: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_highlighter_is_identity() {
        let h = NoHighlighter;
        assert_eq!(h.highlight("abc"), "abc");
    }
}
