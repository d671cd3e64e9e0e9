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

//! Command verb table: decodes one leading address list and verb off a
//! command line and invokes the matching [`crate::editor::Editor`]
//! operation. `run_one` is the entry point the command loop (and, for
//! `g`/`v`/`G`/`V` bodies, the global engine itself) calls per line.

use crate::address::{self, AddressExtraction};
use crate::editor::Editor;
use crate::error::{EdError, EdResult};
use crate::io;
use std::io::{BufRead, Write};

fn range_or(addrs: &AddressExtraction, lo: usize, hi: usize) -> (usize, usize) {
    if addrs.addr_count == 0 {
        (lo, hi)
    } else {
        (addrs.first_addr.unwrap(), addrs.second_addr.unwrap())
    }
}

fn single_or(addrs: &AddressExtraction, default: usize) -> usize {
    if addrs.addr_count == 0 {
        default
    } else {
        addrs.second_addr.unwrap()
    }
}

fn leading_number(input: &str) -> Option<i32> {
    let digits_len = input.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    input[..digits_len].parse().ok()
}

/// Reads text-entry lines for `a`/`i`/`c` until a line equal to `.` or EOF.
fn collect_text(input: &mut dyn BufRead) -> EdResult<Vec<String>> {
    let mut lines = Vec::new();
    loop {
        match io::read_stdin_line(input)? {
            Some(line) if line == "." => break,
            Some(line) => lines.push(line),
            None => break,
        }
    }
    Ok(lines)
}

/// Expands `%`/`\` and, for `f`, a leading `~/` against `$HOME` — GNU ed
/// itself only does the former; the latter is this crate's own filename
/// convenience since it has no shell to do it for you.
fn expand_tilde(arg: &str) -> String {
    if let Some(rest) = arg.strip_prefix("~/") {
        if let Some(home) = crate::signal::home_directory() {
            return format!("{home}/{rest}");
        }
    }
    arg.to_string()
}

/// Runs one command line: parses its leading address list, then dispatches
/// on the verb that follows. Returns `Err(EdError::Quit(code))` to signal
/// the command loop should exit; any other `Err` is a user-visible editor
/// error the caller turns into a `?` prompt.
pub fn run_one(editor: &mut Editor, line: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> EdResult<()> {
    if let Some(err) = crate::signal::take_pending_interrupt() {
        return Err(err);
    }
    let mut rest: &str = line;
    let addrs = address::parse_addresses(&mut rest, editor)?;
    rest = rest.trim_start_matches([' ', '\t']);
    dispatch(editor, addrs, rest, input, out)
}

fn dispatch(editor: &mut Editor, addrs: AddressExtraction, rest: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> EdResult<()> {
    let mut rest = rest;
    let verb = match rest.chars().next() {
        Some(c) => {
            rest = &rest[c.len_utf8()..];
            c
        }
        None => {
            let addr = if addrs.addr_count == 0 { editor.current_addr() + 1 } else { addrs.second_addr.unwrap() };
            return editor.print_default(out, addr, addr);
        }
    };

    match verb {
        'a' => {
            let after = single_or(&addrs, editor.current_addr());
            let lines = collect_text(input)?;
            editor.append_lines(after, &lines)
        }
        'i' => {
            let addr = single_or(&addrs, editor.current_addr());
            let lines = collect_text(input)?;
            editor.append_lines(addr.saturating_sub(1), &lines)
        }
        'c' => {
            let (first, last) = range_or(&addrs, editor.current_addr(), editor.current_addr());
            let lines = collect_text(input)?;
            editor.change_lines(first, last, &lines)
        }
        'd' => {
            let (first, last) = range_or(&addrs, editor.current_addr(), editor.current_addr());
            editor.delete_lines(first, last)
        }
        'j' => {
            let (first, last) = match addrs.addr_count {
                0 => (editor.current_addr(), (editor.current_addr() + 1).min(editor.last_addr())),
                1 => return Ok(()), // a single explicit address is a no-op, matching GNU ed
                _ => (addrs.first_addr.unwrap(), addrs.second_addr.unwrap()),
            };
            editor.join_lines(first, last)
        }
        'm' | 't' => {
            let (first, last) = range_or(&addrs, editor.current_addr(), editor.current_addr());
            let dest_addrs = address::parse_addresses(&mut rest, editor)?;
            let dest = if dest_addrs.addr_count == 0 {
                return Err(EdError::InvalidDestination);
            } else {
                dest_addrs.second_addr.unwrap()
            };
            if verb == 'm' {
                editor.move_lines(first, last, dest)
            } else {
                editor.copy_lines(first, last, dest)
            }
        }
        'y' => {
            let (first, last) = range_or(&addrs, editor.current_addr(), editor.current_addr());
            editor.yank_lines(first, last)
        }
        'x' => {
            let after = single_or(&addrs, editor.current_addr());
            editor.put_lines(after)
        }
        'k' => {
            let addr = single_or(&addrs, editor.current_addr());
            let mark = rest.chars().next().ok_or(EdError::InvalidMarkCharacter)?;
            editor.set_mark(addr, mark)
        }
        'p' => {
            let (first, last) = range_or(&addrs, editor.current_addr(), editor.current_addr());
            editor.print_default(out, first, last)
        }
        'n' => {
            let (first, last) = range_or(&addrs, editor.current_addr(), editor.current_addr());
            editor.print_numbered(out, first, last)
        }
        'l' => {
            let (first, last) = range_or(&addrs, editor.current_addr(), editor.current_addr());
            editor.print_list(out, first, last)
        }
        's' => {
            let (first, last) = range_or(&addrs, editor.current_addr(), editor.current_addr());
            editor.parse_and_substitute(first, last, &mut rest, out)
        }
        'g' | 'v' => {
            let sense = verb == 'g';
            let (first, last) = range_or(&addrs, 1, editor.last_addr());
            editor.enter_global()?;
            let result = (|| -> EdResult<()> {
                editor.build_active_set(first, last, &mut rest, sense)?;
                let trimmed = rest.trim();
                let body: String = if trimmed.is_empty() { "p".to_string() } else { trimmed.to_string() };
                while editor.active_remaining() {
                    if let Some(err) = crate::signal::take_pending_interrupt() {
                        return Err(err);
                    }
                    let Some(addr) = editor.next_active_addr() else { break };
                    editor.set_current_addr(addr);
                    run_one(editor, &body, input, out)?;
                }
                Ok(())
            })();
            editor.exit_global();
            result
        }
        'G' | 'V' => {
            let sense = verb == 'G';
            let (first, last) = range_or(&addrs, 1, editor.last_addr());
            editor.enter_global()?;
            let result = (|| -> EdResult<()> {
                editor.build_active_set(first, last, &mut rest, sense)?;
                let mut last_cmd: Option<String> = None;
                while editor.active_remaining() {
                    if let Some(err) = crate::signal::take_pending_interrupt() {
                        return Err(err);
                    }
                    let Some(addr) = editor.next_active_addr() else { break };
                    editor.set_current_addr(addr);
                    editor.print_default(out, addr, addr)?;
                    let Some(line) = io::read_stdin_line(input)? else { break };
                    if line.is_empty() {
                        continue;
                    }
                    let cmd = if line == "&" { last_cmd.clone().ok_or(EdError::NoPreviousCommand)? } else { line };
                    last_cmd = Some(cmd.clone());
                    run_one(editor, &cmd, input, out)?;
                }
                Ok(())
            })();
            editor.exit_global();
            result
        }
        'e' | 'E' => {
            let force = verb == 'E';
            let arg = rest.trim();
            let source = if arg.is_empty() {
                editor.filename().ok_or(EdError::NoCurrentFilename)?.to_string()
            } else {
                editor.expand_percent(arg)?
            };
            if !source.starts_with('!') {
                editor.validate_filename(&source)?;
            }
            if !force && editor.is_modified() {
                if !editor.take_emod_override() {
                    editor.note_emod_warning();
                    return Err(EdError::BufferModified);
                }
            }
            let bytes = editor.edit(&source, true)?;
            if !editor.scripted {
                writeln!(out, "{bytes}").map_err(|e| EdError::IoError(e.to_string(), "stdout"))?;
            }
            Ok(())
        }
        'r' => {
            let after = single_or(&addrs, editor.last_addr());
            let arg = rest.trim();
            let source = if arg.is_empty() {
                editor.filename().ok_or(EdError::NoCurrentFilename)?.to_string()
            } else {
                editor.expand_percent(arg)?
            };
            if !source.starts_with('!') {
                editor.validate_filename(&source)?;
            }
            let bytes = editor.read(after, &source)?;
            if !editor.scripted {
                writeln!(out, "{bytes}").map_err(|e| EdError::IoError(e.to_string(), "stdout"))?;
            }
            Ok(())
        }
        'w' | 'W' => {
            let (first, last) = range_or(&addrs, 1, editor.last_addr());
            let arg = rest.trim();
            let dest = if arg.is_empty() {
                editor.filename().ok_or(EdError::NoCurrentFilename)?.to_string()
            } else {
                editor.expand_percent(arg)?
            };
            if !dest.starts_with('!') {
                editor.validate_filename(&dest)?;
            }
            let bytes = editor.write(first, last, &dest, verb == 'W')?;
            if !editor.scripted {
                writeln!(out, "{bytes}").map_err(|e| EdError::IoError(e.to_string(), "stdout"))?;
            }
            Ok(())
        }
        'u' => editor.undo(),
        'z' => {
            let addr = single_or(&addrs, editor.current_addr() + 1).max(1);
            let n = match leading_number(rest) {
                Some(n) if n > 0 => {
                    crate::signal::set_window_lines(n);
                    n
                }
                _ => crate::signal::window_lines(),
            };
            let last = (addr + n as usize - 1).min(editor.last_addr());
            editor.print_default(out, addr, last)
        }
        '=' => {
            let addr = single_or(&addrs, editor.last_addr());
            writeln!(out, "{addr}").map_err(|e| EdError::IoError(e.to_string(), "stdout"))
        }
        '!' => {
            let raw = rest;
            let cmd = if let Some(stripped) = raw.strip_prefix('!') {
                let _ = stripped;
                editor.last_shell_command().ok_or(EdError::NoPreviousCommand)?.to_string()
            } else {
                editor.expand_percent(raw)?
            };
            editor.set_last_shell_command(cmd.clone());
            if addrs.addr_count > 0 {
                let (first, last) = (addrs.first_addr.unwrap(), addrs.second_addr.unwrap());
                editor.filter_lines(first, last, &cmd)
            } else {
                let _status = editor.shell_execute(&cmd)?;
                if !editor.scripted {
                    writeln!(out, "!").map_err(|e| EdError::IoError(e.to_string(), "stdout"))?;
                }
                Ok(())
            }
        }
        'f' => {
            let arg = rest.trim();
            if !arg.is_empty() {
                let name = expand_tilde(arg);
                editor.validate_filename(&name)?;
                editor.set_filename(name);
            }
            writeln!(out, "{}", editor.filename().unwrap_or("")).map_err(|e| EdError::IoError(e.to_string(), "stdout"))
        }
        'P' => {
            editor.prompt_on = !editor.prompt_on;
            Ok(())
        }
        'H' => {
            editor.verbose = !editor.verbose;
            Ok(())
        }
        'h' => {
            if let Some(e) = editor.last_error() {
                writeln!(out, "{e}").map_err(|e| EdError::IoError(e.to_string(), "stdout"))?;
            }
            Ok(())
        }
        'q' | 'Q' => {
            if verb == 'q' && editor.is_modified() {
                if !editor.take_emod_override() {
                    editor.note_emod_warning();
                    return Err(EdError::BufferModified);
                }
            }
            Err(EdError::Quit(0))
        }
        '#' => Ok(()),
        _ => Err(EdError::InvalidCommandSuffix),
    }
}
