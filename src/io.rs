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

//! File, shell-command, and stdin I/O: the part of the editor that talks
//! to the outside world. Reading inserts lines into the buffer at an
//! address; writing streams a range back out. Shell commands (`!cmd`,
//! `r !cmd`, `w !cmd`) run through `/bin/sh -c` and are refused outright
//! in restricted mode.

use crate::buffer::{Handle, LineBuffer};
use crate::error::EdError;
use crate::scratch::ScratchStore;
use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

pub const PF_NUMBER: u8 = 0x1;
pub const PF_LIST: u8 = 0x2;

/// Maps a control byte to the GNU-ed mnemonic used in `l` (list) output.
pub fn escchar(ch: u8) -> Option<char> {
    match ch {
        0x07 => Some('a'),
        0x08 => Some('b'),
        0x0c => Some('f'),
        b'\n' => Some('n'),
        b'\r' => Some('r'),
        b'\t' => Some('t'),
        0x0b => Some('v'),
        _ => None,
    }
}

/// Formats one line for `p`/`n`/`l` per `pflags`, matching GNU ed's
/// `print_line`: `PF_NUMBER` prefixes `addr\t`, `PF_LIST` escapes control
/// characters, backslashes and `$`, and terminates with a literal `$`
/// instead of a real newline.
pub fn format_line(text: &str, addr: usize, pflags: u8) -> String {
    let mut out = String::new();
    if pflags & PF_NUMBER != 0 {
        out.push_str(&format!("{addr}\t"));
    }
    if pflags & PF_LIST == 0 {
        out.push_str(text);
    } else {
        for ch in text.chars() {
            if ch as u32 <= 0x7f {
                if let Some(mnemonic) = escchar(ch as u8) {
                    out.push('\\');
                    out.push(mnemonic);
                    continue;
                }
            }
            match ch {
                '\\' => out.push_str("\\\\"),
                '$' => out.push_str("\\$"),
                c if (c as u32) < 0x20 || c as u32 == 0x7f => out.push_str(&format!("\\{:03o}", c as u32)),
                c => out.push(c),
            }
        }
        out.push('$');
    }
    out
}

/// Writes lines `from..=to` to `out`, one per line, formatted per
/// `pflags`. Advances nothing in the buffer; the caller updates `.`.
pub fn print_lines(
    buf: &mut LineBuffer,
    store: &mut ScratchStore,
    out: &mut dyn Write,
    from: usize,
    to: usize,
    pflags: u8,
) -> Result<(), EdError> {
    if from == 0 || from > to || to > buf.len() {
        return Err(EdError::InvalidAddress);
    }
    let mut h = buf.handle_at(from);
    for addr in from..=to {
        let text = buf.text(h, store)?;
        writeln!(out, "{}", format_line(&text, addr, pflags)).map_err(|e| EdError::IoError(e.to_string(), "stdout"))?;
        h = buf.next(h);
    }
    Ok(())
}

/// One line read in from a file/shell stream. `text` never contains its
/// own trailing newline; `terminated` records whether the source line
/// actually had one (only meaningful for the final line read).
pub struct ReadLine {
    pub text: String,
    pub terminated: bool,
}

fn split_lines(raw: &str, strip_cr: bool) -> Vec<ReadLine> {
    let mut result = Vec::new();
    let mut rest = raw;
    while !rest.is_empty() {
        match rest.find('\n') {
            Some(idx) => {
                let mut line = rest[..idx].to_string();
                if strip_cr && line.ends_with('\r') {
                    line.pop();
                }
                result.push(ReadLine { text: line, terminated: true });
                rest = &rest[idx + 1..];
            }
            None => {
                result.push(ReadLine { text: rest.to_string(), terminated: false });
                rest = "";
            }
        }
    }
    result
}

/// Inserts `lines` into the buffer after `after`, returning the handle of
/// the last line inserted (or `after` itself if `lines` was empty) and
/// the total byte count read, matching the number GNU ed prints after
/// `r`/`e`.
fn insert_lines(
    buf: &mut LineBuffer,
    store: &mut ScratchStore,
    mut after: Handle,
    lines: &[ReadLine],
) -> Result<(Handle, u64), EdError> {
    let mut total = 0u64;
    for (i, line) in lines.iter().enumerate() {
        buf.validate_line_text(line.text.as_bytes())?;
        let span = store.put(line.text.as_bytes())?;
        let h = buf.insert_after(after, span)?;
        let is_last = i + 1 == lines.len();
        buf.set_unterminated(h, is_last && !line.terminated);
        total += line.text.len() as u64 + if line.terminated { 1 } else { 0 };
        after = h;
    }
    Ok((after, total))
}

/// Reads a whole file (or, if `source` starts with `!`, a shell command's
/// stdout) and inserts it after `after`. Returns `(last handle inserted,
/// byte count)`.
pub fn read_file(
    buf: &mut LineBuffer,
    store: &mut ScratchStore,
    after: Handle,
    source: &str,
    restricted: bool,
    strip_cr: bool,
) -> Result<(Handle, u64), EdError> {
    if let Some(cmd) = source.strip_prefix('!') {
        return read_shell_command(buf, store, after, cmd, restricted, strip_cr);
    }
    let raw = std::fs::read(source).map_err(|e| EdError::IoError(describe_io_error(&e), "read"))?;
    let text = String::from_utf8_lossy(&raw).into_owned();
    let lines = split_lines(&text, strip_cr);
    insert_lines(buf, store, after, &lines)
}

fn read_shell_command(
    buf: &mut LineBuffer,
    store: &mut ScratchStore,
    after: Handle,
    command: &str,
    restricted: bool,
    strip_cr: bool,
) -> Result<(Handle, u64), EdError> {
    if restricted {
        return Err(EdError::ShellAccessRestricted);
    }
    let output = Command::new("/bin/sh")
        .arg("-c")
        .arg(command)
        .output()
        .map_err(|e| EdError::IoError(e.to_string(), "shell"))?;
    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    let lines = split_lines(&text, strip_cr);
    insert_lines(buf, store, after, &lines)
}

/// Writes lines `from..=to` to a file (truncating unless `append`), or
/// pipes them to a shell command's stdin if `dest` starts with `!`.
/// Returns the byte count written.
pub fn write_file(
    buf: &mut LineBuffer,
    store: &mut ScratchStore,
    from: usize,
    to: usize,
    dest: &str,
    append: bool,
    restricted: bool,
) -> Result<u64, EdError> {
    if let Some(cmd) = dest.strip_prefix('!') {
        return write_shell_command(buf, store, from, to, cmd, restricted);
    }
    let file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(dest)
        .map_err(|e| EdError::IoError(describe_io_error(&e), "write"))?;
    let mut writer = std::io::BufWriter::new(file);
    let total = write_range(buf, store, &mut writer, from, to)?;
    writer.flush().map_err(|e| EdError::IoError(e.to_string(), "write"))?;
    Ok(total)
}

fn write_shell_command(
    buf: &mut LineBuffer,
    store: &mut ScratchStore,
    from: usize,
    to: usize,
    command: &str,
    restricted: bool,
) -> Result<u64, EdError> {
    if restricted {
        return Err(EdError::ShellAccessRestricted);
    }
    let mut child = Command::new("/bin/sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| EdError::IoError(e.to_string(), "shell"))?;
    let total = {
        let stdin = child.stdin.as_mut().ok_or(EdError::Fatal("shell stdin unavailable"))?;
        write_range(buf, store, stdin, from, to)?
    };
    child.wait().map_err(|e| EdError::IoError(e.to_string(), "shell"))?;
    Ok(total)
}

fn write_range(
    buf: &mut LineBuffer,
    store: &mut ScratchStore,
    out: &mut dyn Write,
    from: usize,
    to: usize,
) -> Result<u64, EdError> {
    if from == 0 || from > to {
        return Ok(0);
    }
    let mut total = 0u64;
    let mut h = buf.handle_at(from);
    for addr in from..=to {
        let text = buf.text(h, store)?;
        out.write_all(text.as_bytes()).map_err(|e| EdError::IoError(e.to_string(), "write"))?;
        total += text.len() as u64;
        if !(addr == to && buf.is_unterminated(h)) {
            out.write_all(b"\n").map_err(|e| EdError::IoError(e.to_string(), "write"))?;
            total += 1;
        }
        h = buf.next(h);
    }
    Ok(total)
}

fn describe_io_error(e: &std::io::Error) -> String {
    use std::io::ErrorKind;
    match e.kind() {
        ErrorKind::NotFound => "No such file or directory".to_string(),
        ErrorKind::PermissionDenied => "Permission denied".to_string(),
        _ => e.to_string(),
    }
}

/// Reads one line from stdin for interactive input mode (the `a`/`i`/`c`
/// text-entry loop terminator is handled by the caller checking for a
/// lone `.`). Returns `None` on EOF.
pub fn read_stdin_line(input: &mut dyn BufRead) -> Result<Option<String>, EdError> {
    let mut line = String::new();
    let n = input.read_line(&mut line).map_err(|e| EdError::IoError(e.to_string(), "stdin"))?;
    if n == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(Some(line))
}
