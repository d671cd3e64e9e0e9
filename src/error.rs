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

//! Error kinds for the editor. Every fallible operation returns
//! `Result<_, EdError>`; the dispatcher is the only place that turns one
//! into the `?` prompt the user sees.

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum EdError {
    #[error("Invalid address")]
    InvalidAddress,

    #[error("Invalid command suffix")]
    InvalidCommandSuffix,

    #[error("Invalid destination")]
    InvalidDestination,

    #[error("Invalid mark character")]
    InvalidMarkCharacter,

    #[error("Invalid pattern delimiter")]
    InvalidPatternDelimiter,

    #[error("Missing pattern delimiter")]
    MissingPatternDelimiter,

    #[error("Unbalanced brackets ([])")]
    UnbalancedBrackets,

    #[error("Trailing backslash (\\)")]
    TrailingBackslash,

    #[error("No previous pattern")]
    NoPreviousPattern,

    #[error("No previous substitution")]
    NoPreviousSubstitution,

    #[error("No previous command")]
    NoPreviousCommand,

    #[error("No current filename")]
    NoCurrentFilename,

    #[error("No match")]
    NoMatch,

    #[error("Nothing to put")]
    NothingToPut,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Cannot nest global commands")]
    CannotNestGlobal,

    #[error("Shell access restricted")]
    ShellAccessRestricted,

    #[error("Directory access restricted")]
    DirectoryAccessRestricted,

    #[error("Filename too long")]
    FilenameTooLong,

    #[error("Too many lines")]
    TooManyLines,

    #[error("Too many matching lines")]
    TooManyMatchingLines,

    #[error("Undo stack too long")]
    UndoStackTooLong,

    #[error("Line too long")]
    LineTooLong,

    #[error("Memory exhausted")]
    MemoryExhausted,

    #[error("Infinite substitution loop")]
    InfiniteSubstitutionLoop,

    #[error("Suffix 'I' not allowed on empty regexp")]
    InvalidIgnoreCaseSuffix,

    #[error("{1}: {0}")]
    IoError(String, &'static str),

    #[error("{0}")]
    RegexError(String),

    #[error("Interrupt")]
    Interrupt,

    #[error("warning: file modified")]
    BufferModified,

    #[error("internal error: {0}")]
    Fatal(&'static str),

    /// Not a user-visible error: unwinds the command loop to exit the process.
    #[error("")]
    Quit(i32),
}

impl EdError {
    /// Exit code GNU ed would use if this error terminated the process.
    pub fn exit_code(&self) -> i32 {
        match self {
            EdError::Quit(code) => *code,
            EdError::Fatal(_) => 3,
            EdError::IoError(..) => 1,
            _ => 2,
        }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, EdError::Quit(_))
    }
}

pub type EdResult<T> = Result<T, EdError>;
