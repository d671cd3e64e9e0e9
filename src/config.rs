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

//! Command-line configuration, via `clap`'s derive macro rather than the
//! hand-rolled getopt clone the teacher declared `clap` for but never used.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ed",
    version = "1.22.2-rust",
    about = "A line-oriented text editor.",
    long_about = "GNU ed is a line-oriented text editor. It is used to create, display,\n\
modify and otherwise manipulate text files, both interactively and via\n\
shell scripts. A restricted version of ed, red, can only edit files in\n\
the current directory and cannot execute shell commands.\n\n\
The environment variable LINES can be used to set the initial window size."
)]
pub struct Config {
    /// Use extended regular expressions
    #[arg(short = 'E', long = "extended-regexp")]
    pub extended_regexp: bool,

    /// Run in compatibility mode
    #[arg(short = 'G', long = "traditional")]
    pub traditional: bool,

    /// Exit with 0 status even if a command fails
    #[arg(short = 'l', long = "loose-exit-status")]
    pub loose_exit_status: bool,

    /// Use STRING as an interactive prompt
    #[arg(short = 'p', long = "prompt", value_name = "STRING")]
    pub prompt: Option<String>,

    /// Suppress diagnostics written to stderr
    #[arg(short = 'q', long = "quiet", visible_alias = "silent")]
    pub quiet: bool,

    /// Run in restricted mode
    #[arg(short = 'r', long = "restricted")]
    pub restricted: bool,

    /// Suppress byte counts and '!' prompt
    #[arg(short = 's', long = "script")]
    pub script: bool,

    /// Be verbose; equivalent to the 'H' command
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Strip carriage returns at end of text lines
    #[arg(long = "strip-trailing-cr")]
    pub strip_trailing_cr: bool,

    /// Allow control characters in file names
    #[arg(long = "unsafe-names")]
    pub unsafe_names: bool,

    /// Highlight LANG's syntax in 'l' output (no-op without a real highlighter plugged in)
    #[arg(short = 'H', long = "highlight", value_name = "LANG")]
    pub highlight_lang: Option<String>,

    /// File to edit, optionally preceded by +line, +/RE, or +?RE
    pub file: Option<String>,
}

impl Config {
    pub fn prompt_string(&self) -> &str {
        self.prompt.as_deref().unwrap_or("*")
    }
}
