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

//! Undo tracking.
//!
//! GNU `ed` gives you exactly one level of undo: each command that mutates
//! the buffer records a frame of atoms, and `u` reverses that frame and,
//! crucially, leaves behind a frame that reverses *itself* — so a second
//! `u` redoes the change. We model that as a single current frame plus one
//! frame recording the change `u` itself made, swapped on each call.

use crate::buffer::{Handle, LineBuffer};
use crate::error::EdError;
use crate::scratch::Span;

#[derive(Debug, Clone, Copy)]
pub enum UndoAtom {
    /// A line at `handle` was inserted after `after`; undoing removes it.
    Add { after: Handle, handle: Handle, span: Span, unterminated: bool },
    /// A line was removed from after `after`; undoing re-inserts it.
    Del { after: Handle, handle: Handle, span: Span, unterminated: bool },
    /// A line moved from after `old_after` to after `new_after`; undoing
    /// swaps the two anchors and repeats the move.
    Move { handle: Handle, old_after: Handle, new_after: Handle },
}

#[derive(Default)]
pub struct UndoFrame {
    atoms: Vec<UndoAtom>,
    pub saved_current_addr: usize,
    pub saved_last_addr: usize,
    pub saved_modified: bool,
}

pub struct UndoStack {
    /// The frame that would undo the last committed change. `None` until
    /// something has been done, or after `u` has nothing left to reverse.
    current: Option<UndoFrame>,
    limit: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        UndoStack { current: None, limit: 1_000_000 }
    }

    pub fn begin_frame(&mut self, current_addr: usize, last_addr: usize, modified: bool) {
        self.current = Some(UndoFrame {
            atoms: Vec::new(),
            saved_current_addr: current_addr,
            saved_last_addr: last_addr,
            saved_modified: modified,
        });
    }

    pub fn push(&mut self, atom: UndoAtom) -> Result<(), EdError> {
        let frame = self.current.as_mut().expect("push called outside an undo frame");
        if frame.atoms.len() >= self.limit {
            return Err(EdError::UndoStackTooLong);
        }
        frame.atoms.push(atom);
        Ok(())
    }

    pub fn has_pending_frame(&self) -> bool {
        self.current.is_some()
    }

    pub fn discard_frame(&mut self) {
        self.current = None;
    }

    /// Reverses the current frame against `buf`, returning the
    /// `(current_addr, last_addr, modified)` to restore, and replaces the
    /// current frame with one that reverses this undo (so `u` is its own
    /// involution, matching GNU ed).
    pub fn undo(&mut self, buf: &mut LineBuffer) -> Result<(usize, usize, bool), EdError> {
        let frame = self.current.take().ok_or(EdError::NothingToUndo)?;
        let mut reverse_atoms = Vec::with_capacity(frame.atoms.len());

        for atom in frame.atoms.iter().rev() {
            match *atom {
                UndoAtom::Add { after, handle, span, unterminated } => {
                    buf.remove(handle);
                    reverse_atoms.push(UndoAtom::Del { after, handle, span, unterminated });
                }
                UndoAtom::Del { after, span, unterminated, .. } => {
                    let handle = buf.reinsert_after(after, span, unterminated)?;
                    reverse_atoms.push(UndoAtom::Add { after, handle, span, unterminated });
                }
                UndoAtom::Move { handle, old_after, new_after } => {
                    buf.detach(handle);
                    buf.attach_after(old_after, handle);
                    reverse_atoms.push(UndoAtom::Move { handle, old_after: new_after, new_after: old_after });
                }
            }
        }
        // The replacement frame must replay in the same forward order the
        // original commands would have: reverse_atoms was built by walking
        // `frame.atoms` back-to-front, so reverse it once more.
        reverse_atoms.reverse();

        let restored = (frame.saved_current_addr, frame.saved_last_addr, frame.saved_modified);
        self.current = Some(UndoFrame {
            atoms: reverse_atoms,
            saved_current_addr: 0,
            saved_last_addr: 0,
            saved_modified: true,
        });
        Ok(restored)
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
