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

//! `Editor` gathers every piece of session state — the line buffer, the
//! scratch store backing it, the undo stack, marks, the regex cache, the
//! active set used by global commands, the yank buffer, and the mutable
//! config toggles (`prompt_on`, `verbose`, ...) — into one value instead
//! of the teacher's scattered file-scope `static Mutex`/`AtomicBool`
//! globals. Only state a real OS signal handler must reach (see
//! `crate::signal`) remains outside it.

use crate::address::AddressContext;
use crate::buffer::{dec_addr, inc_addr, Handle, LineBuffer};
use crate::config::Config;
use crate::error::{EdError, EdResult};
use crate::global::ActiveSet;
use crate::highlight::{Highlighter, NoHighlighter};
use crate::io::{self, PF_LIST, PF_NUMBER};
use crate::marks::MarkTable;
use crate::regex_facade::RegexFacade;
use crate::scratch::{ScratchStore, Span};
use crate::undo::{UndoAtom, UndoStack};
use std::io::Write;

pub struct Editor {
    buf: LineBuffer,
    store: ScratchStore,
    undo: UndoStack,
    marks: MarkTable,
    regex: RegexFacade,
    active: ActiveSet,
    yank: Vec<(Span, bool)>,

    current_addr: usize,
    modified: bool,
    filename: Option<String>,

    pub prompt_on: bool,
    pub prompt: String,
    pub verbose: bool,
    pub restricted: bool,
    pub scripted: bool,
    pub extended_regexp: bool,
    pub traditional: bool,
    pub strip_trailing_cr: bool,

    in_global: bool,
    highlighter: Box<dyn Highlighter>,

    last_error: Option<EdError>,
    emod_warned: bool,
    last_shell_cmd: Option<String>,
}

impl Editor {
    pub fn new(config: &Config) -> EdResult<Self> {
        Ok(Editor {
            buf: LineBuffer::new(),
            store: ScratchStore::new()?,
            undo: UndoStack::new(),
            marks: MarkTable::new(),
            regex: RegexFacade::new(),
            active: ActiveSet::new(),
            yank: Vec::new(),
            current_addr: 0,
            modified: false,
            filename: config.file.clone().filter(|f| !f.starts_with('!') && !f.starts_with('+')),
            prompt_on: false,
            prompt: config.prompt_string().to_string(),
            verbose: config.verbose,
            restricted: config.restricted,
            scripted: config.script,
            extended_regexp: config.extended_regexp,
            traditional: config.traditional,
            strip_trailing_cr: config.strip_trailing_cr,
            in_global: false,
            highlighter: Box::new(NoHighlighter),
            last_error: None,
            emod_warned: false,
            last_shell_cmd: None,
        })
    }

    pub fn set_highlighter(&mut self, h: Box<dyn Highlighter>) {
        self.highlighter = h;
    }

    pub fn current_addr(&self) -> usize {
        self.current_addr
    }

    pub fn last_addr(&self) -> usize {
        self.buf.len()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, name: String) {
        self.filename = Some(name);
    }

    fn require_address(&self, addr: usize) -> EdResult<()> {
        if addr > self.last_addr() {
            Err(EdError::InvalidAddress)
        } else {
            Ok(())
        }
    }

    fn check_interrupt() -> EdResult<()> {
        if let Some(e) = crate::signal::take_pending_interrupt() {
            return Err(e);
        }
        Ok(())
    }

    fn begin_undo_frame(&mut self) {
        self.undo.begin_frame(self.current_addr, self.last_addr(), self.modified);
    }

    // ---- text entry -----------------------------------------------------

    /// Inserts `lines` after address `after` (0 = before the first line),
    /// leaving `.` on the last line inserted. Used by `a`, `r`, and by `i`
    /// after adjusting `after` to `addr - 1`.
    pub fn append_lines(&mut self, after: usize, lines: &[String]) -> EdResult<()> {
        self.require_address(after)?;
        self.begin_undo_frame();
        self.append_lines_inner(after, lines)
    }

    /// Body of `append_lines` without opening a new undo frame, so a
    /// composite command (`c`, `j`, a line-filter `!`) can record its
    /// delete and its re-append in the same frame.
    fn append_lines_inner(&mut self, after: usize, lines: &[String]) -> EdResult<()> {
        let mut anchor = self.buf.handle_at(after);
        for text in lines {
            self.buf.validate_line_text(text.as_bytes())?;
            let span = self.store.put(text.as_bytes())?;
            let h = self.buf.insert_after(anchor, span)?;
            self.undo.push(UndoAtom::Add { after: anchor, handle: h, span, unterminated: false })?;
            anchor = h;
        }
        self.current_addr = after + lines.len();
        if !lines.is_empty() {
            self.modified = true;
        }
        Ok(())
    }

    /// Deletes lines `first..=last`, recording each as a `Del` undo atom
    /// in reverse so undo re-inserts them in their original order.
    pub fn delete_lines(&mut self, first: usize, last: usize) -> EdResult<()> {
        if first == 0 || first > last || last > self.last_addr() {
            return Err(EdError::InvalidAddress);
        }
        self.begin_undo_frame();
        self.delete_lines_inner(first, last)
    }

    /// Body of `delete_lines` without opening a new undo frame; see
    /// `append_lines_inner`.
    fn delete_lines_inner(&mut self, first: usize, last: usize) -> EdResult<()> {
        let mut handles = Vec::with_capacity(last - first + 1);
        let mut h = self.buf.handle_at(first);
        for _ in first..=last {
            handles.push(h);
            h = self.buf.next(h);
        }
        for &dh in handles.iter().rev() {
            let after = self.buf.prev(dh);
            let span = self.buf.span(dh);
            let unterminated = self.buf.is_unterminated(dh);
            self.marks.clear_references_to(dh);
            self.active.unset(dh);
            self.buf.remove(dh);
            self.undo.push(UndoAtom::Del { after, handle: dh, span, unterminated })?;
        }
        self.current_addr = first.saturating_sub(1).min(self.last_addr());
        self.modified = true;
        Ok(())
    }

    /// `c`: replace `first..=last` with freshly entered text. Delete and
    /// re-append share one undo frame, so a single `u` restores the
    /// original lines.
    pub fn change_lines(&mut self, first: usize, last: usize, lines: &[String]) -> EdResult<()> {
        if first == 0 || first > last || last > self.last_addr() {
            return Err(EdError::InvalidAddress);
        }
        self.begin_undo_frame();
        self.delete_lines_inner(first, last)?;
        let after = first.saturating_sub(1);
        self.append_lines_inner(after, lines)
    }

    /// `j`: concatenates `first..=last` into a single line, replacing the
    /// range. Delete and re-append share one undo frame.
    pub fn join_lines(&mut self, first: usize, last: usize) -> EdResult<()> {
        if first == 0 || first >= last || last > self.last_addr() {
            return Err(EdError::InvalidAddress);
        }
        let mut joined = String::new();
        let mut h = self.buf.handle_at(first);
        for i in first..=last {
            joined.push_str(&self.buf.text(h, &mut self.store)?);
            if i != last {
                h = self.buf.next(h);
            }
        }
        self.begin_undo_frame();
        self.delete_lines_inner(first, last)?;
        self.append_lines_inner(first.saturating_sub(1), std::slice::from_ref(&joined))
    }

    /// `m`: moves `first..=last` to just after `dest` (`dest == 0` means
    /// the front of the buffer). `dest` inside `[first, last]` is
    /// rejected, matching GNU ed.
    pub fn move_lines(&mut self, first: usize, last: usize, dest: usize) -> EdResult<()> {
        if first == 0 || first > last || last > self.last_addr() {
            return Err(EdError::InvalidAddress);
        }
        if dest >= first && dest <= last {
            return Err(EdError::InvalidDestination);
        }
        if dest == first.saturating_sub(1) || dest == last {
            self.current_addr = last;
            return Ok(()); // no-op move, matches GNU ed's boundary check
        }

        self.begin_undo_frame();
        let mut handles = Vec::with_capacity(last - first + 1);
        let mut h = self.buf.handle_at(first);
        for _ in first..=last {
            handles.push(h);
            h = self.buf.next(h);
        }

        let dest_handle = self.buf.handle_at(dest);
        let mut anchor = dest_handle;
        for &mh in &handles {
            let old_after = self.buf.prev(mh);
            self.active.unset(mh);
            self.buf.detach(mh);
            self.buf.attach_after(anchor, mh);
            self.undo.push(UndoAtom::Move { handle: mh, old_after, new_after: anchor })?;
            anchor = mh;
        }

        self.current_addr = if dest < first {
            dest + (last - first + 1)
        } else {
            dest
        };
        self.modified = true;
        Ok(())
    }

    /// `t`: copies `first..=last` to just after `dest`, leaving the
    /// source untouched.
    pub fn copy_lines(&mut self, first: usize, last: usize, dest: usize) -> EdResult<()> {
        if first == 0 || first > last || last > self.last_addr() {
            return Err(EdError::InvalidAddress);
        }
        self.begin_undo_frame();
        let mut anchor = self.buf.handle_at(dest);
        let mut src = self.buf.handle_at(first);
        let mut copied = 0;
        for _ in first..=last {
            let span = self.buf.span(src);
            let unterminated = self.buf.is_unterminated(src);
            let h = self.buf.insert_after(anchor, span)?;
            self.buf.set_unterminated(h, unterminated);
            self.undo.push(UndoAtom::Add { after: anchor, handle: h, span, unterminated })?;
            anchor = h;
            src = self.buf.next(src);
            copied += 1;
        }
        self.current_addr = dest + copied;
        self.modified = true;
        Ok(())
    }

    /// `y`: copies `first..=last` into the yank buffer (does not undo).
    pub fn yank_lines(&mut self, first: usize, last: usize) -> EdResult<()> {
        if first == 0 || first > last || last > self.last_addr() {
            return Err(EdError::InvalidAddress);
        }
        self.yank.clear();
        let mut h = self.buf.handle_at(first);
        for _ in first..=last {
            self.yank.push((self.buf.span(h), self.buf.is_unterminated(h)));
            h = self.buf.next(h);
        }
        Ok(())
    }

    /// `x`: inserts the yank buffer after `after`.
    pub fn put_lines(&mut self, after: usize) -> EdResult<()> {
        if self.yank.is_empty() {
            return Err(EdError::NothingToPut);
        }
        self.require_address(after)?;
        self.begin_undo_frame();
        let mut anchor = self.buf.handle_at(after);
        for &(span, unterminated) in &self.yank.clone() {
            let h = self.buf.insert_after(anchor, span)?;
            self.buf.set_unterminated(h, unterminated);
            self.undo.push(UndoAtom::Add { after: anchor, handle: h, span, unterminated })?;
            anchor = h;
        }
        self.current_addr = after + self.yank.len();
        self.modified = true;
        Ok(())
    }

    // ---- marks ------------------------------------------------------

    pub fn set_mark(&mut self, addr: usize, c: char) -> EdResult<()> {
        self.require_address(addr)?;
        if addr == 0 {
            return Err(EdError::InvalidAddress);
        }
        let h = self.buf.handle_at(addr);
        self.marks.set(c, h)
    }

    pub fn resolve_mark_addr(&self, c: char) -> EdResult<usize> {
        let h = self.marks.get(c)?;
        Ok(self.buf.address_of(h))
    }

    // ---- search -------------------------------------------------------

    pub fn search_line(&mut self, forward: bool, pattern: &mut &str) -> EdResult<usize> {
        let re = self.regex.get_compiled_regex(pattern)?;
        let last = self.last_addr();
        if last == 0 {
            return Err(EdError::NoMatch);
        }
        let mut addr = self.current_addr;
        let start = addr;
        loop {
            addr = if forward { inc_addr(addr, last) } else { dec_addr(addr, last) };
            if addr == start {
                return Err(EdError::NoMatch);
            }
            if addr == 0 {
                continue;
            }
            let h = self.buf.handle_at(addr);
            let text = self.buf.text(h, &mut self.store)?;
            if re.is_match(&text) {
                return Ok(addr);
            }
        }
    }

    // ---- print / list ---------------------------------------------------

    pub fn print_range(&mut self, out: &mut dyn Write, first: usize, last: usize, pflags: u8) -> EdResult<()> {
        if first == 0 || first > last || last > self.last_addr() {
            return Err(EdError::InvalidAddress);
        }
        let mut h = self.buf.handle_at(first);
        for addr in first..=last {
            Self::check_interrupt()?;
            let raw = self.buf.text(h, &mut self.store)?;
            let text = self.highlighter.highlight(&raw);
            writeln!(out, "{}", io::format_line(&text, addr, pflags))
                .map_err(|e| EdError::IoError(e.to_string(), "stdout"))?;
            h = self.buf.next(h);
        }
        self.current_addr = last;
        Ok(())
    }

    pub fn print_default(&mut self, out: &mut dyn Write, first: usize, last: usize) -> EdResult<()> {
        self.print_range(out, first, last, 0)
    }

    pub fn print_numbered(&mut self, out: &mut dyn Write, first: usize, last: usize) -> EdResult<()> {
        self.print_range(out, first, last, PF_NUMBER)
    }

    pub fn print_list(&mut self, out: &mut dyn Write, first: usize, last: usize) -> EdResult<()> {
        self.print_range(out, first, last, PF_LIST)
    }

    // ---- substitution ---------------------------------------------------

    /// `s///[g][p]`: applies the stored substitution regex to each line in
    /// `first..=last`, committing all changes as one undo frame.
    pub fn substitute(
        &mut self,
        first: usize,
        last: usize,
        snum: i32,
        print: Option<u8>,
        out: &mut dyn Write,
    ) -> EdResult<()> {
        if first == 0 || first > last || last > self.last_addr() {
            return Err(EdError::InvalidAddress);
        }
        self.begin_undo_frame();
        let mut h = self.buf.handle_at(first);
        let mut any_changed = false;
        let mut last_changed_addr = 0;
        for addr in first..=last {
            Self::check_interrupt()?;
            let text = self.buf.text(h, &mut self.store)?;
            if let Some(new_text) = self.regex.substitute(&text, snum)? {
                self.buf.validate_line_text(new_text.as_bytes())?;
                let after = self.buf.prev(h);
                let old_span = self.buf.span(h);
                let unterminated = self.buf.is_unterminated(h);
                self.marks.clear_references_to(h);
                self.active.unset(h);
                self.buf.remove(h);
                self.undo.push(UndoAtom::Del { after, handle: h, span: old_span, unterminated })?;

                let new_span = self.store.put(new_text.as_bytes())?;
                let new_h = self.buf.insert_after(after, new_span)?;
                self.buf.set_unterminated(new_h, unterminated);
                self.undo.push(UndoAtom::Add { after, handle: new_h, span: new_span, unterminated })?;

                h = self.buf.next(new_h);
                any_changed = true;
                last_changed_addr = addr;
            } else {
                h = self.buf.next(h);
            }
        }
        if !any_changed {
            self.undo.discard_frame();
            return Err(EdError::NoMatch);
        }
        self.modified = true;
        self.current_addr = last_changed_addr;
        if let Some(pflags) = print {
            self.print_range(out, self.current_addr, self.current_addr, pflags)?;
        }
        Ok(())
    }

    /// Parses and runs a full `s` command: `[addr[,addr]]s/re/repl/[flags]`.
    /// `input` starts just past the `s` verb itself. Flags may appear in
    /// any combination/order: `g` (all matches), `p`/`l`/`n` (print the
    /// last changed line after, like the bare print commands), `I`
    /// (case-insensitive), `r` (reuse the last search regex instead of
    /// compiling the given pattern), and a trailing count (replace only
    /// the Nth match; `g` together with a count is treated as plain `g`).
    pub fn parse_and_substitute(&mut self, first: usize, last: usize, input: &mut &str, out: &mut dyn Write) -> EdResult<()> {
        let pattern = self.regex.get_pattern_for_s(input)?;
        self.regex.extract_replacement(input, self.in_global)?;
        if let Some(delim) = input.chars().next() {
            *input = &input[delim.len_utf8()..];
        }

        let mut global = false;
        let mut ignore_case = false;
        let mut reuse_search = false;
        let mut pflags: Option<u8> = None;
        let mut snum: i32 = 1;
        let mut has_count = false;
        loop {
            match input.chars().next() {
                Some('g') => {
                    global = true;
                    *input = &input[1..];
                }
                Some('p') => {
                    pflags = Some(pflags.unwrap_or(0));
                    *input = &input[1..];
                }
                Some('l') => {
                    pflags = Some(pflags.unwrap_or(0) | io::PF_LIST);
                    *input = &input[1..];
                }
                Some('n') => {
                    pflags = Some(pflags.unwrap_or(0) | io::PF_NUMBER);
                    *input = &input[1..];
                }
                Some('I') => {
                    ignore_case = true;
                    *input = &input[1..];
                }
                Some('r') => {
                    reuse_search = true;
                    *input = &input[1..];
                }
                Some(c) if c.is_ascii_digit() => {
                    let digits_len = input.chars().take_while(char::is_ascii_digit).count();
                    let (digits, rest) = input.split_at(digits_len);
                    snum = digits.parse().map_err(|_| EdError::InvalidCommandSuffix)?;
                    has_count = true;
                    *input = rest;
                }
                _ => break,
            }
        }

        if reuse_search {
            self.regex.replace_subst_re_by_search_re()?;
        } else {
            self.regex.set_subst_regex(&pattern, ignore_case)?;
        }

        let effective_snum = if global { 0 } else if has_count { snum } else { 1 };
        self.substitute(first, last, effective_snum, pflags, out)
    }

    // ---- undo -----------------------------------------------------------

    pub fn undo(&mut self) -> EdResult<()> {
        let (addr, last, modified) = self.undo.undo(&mut self.buf)?;
        self.current_addr = addr.min(self.buf.len());
        let _ = last;
        self.modified = modified;
        Ok(())
    }

    // ---- file I/O ---------------------------------------------------------

    pub fn read(&mut self, after: usize, source: &str) -> EdResult<u64> {
        self.require_address(after)?;
        let anchor = self.buf.handle_at(after);
        let (last_handle, bytes) =
            io::read_file(&mut self.buf, &mut self.store, anchor, source, self.restricted, self.strip_trailing_cr)?;
        self.current_addr = self.buf.address_of(last_handle);
        if self.current_addr > after {
            self.modified = true;
        }
        Ok(bytes)
    }

    pub fn write(&mut self, first: usize, last: usize, dest: &str, append: bool) -> EdResult<u64> {
        let bytes = io::write_file(&mut self.buf, &mut self.store, first, last, dest, append, self.restricted)?;
        if first == 1 && last == self.last_addr() {
            self.modified = false;
        }
        Ok(bytes)
    }

    /// `e`/`E`: discards the current buffer and loads `source` fresh.
    /// `force` skips the unsaved-changes guard used by plain `e`.
    pub fn edit(&mut self, source: &str, force: bool) -> EdResult<u64> {
        if self.modified && !force {
            return Err(EdError::BufferModified);
        }
        self.buf = LineBuffer::new();
        self.store = ScratchStore::new()?;
        self.undo = UndoStack::new();
        self.marks.clear_all();
        self.current_addr = 0;
        self.modified = false;
        if !source.starts_with('!') {
            self.filename = Some(source.to_string());
        }
        let bytes = self.read(0, source)?;
        self.modified = false;
        Ok(bytes)
    }

    /// Writes the whole buffer to `ed.hup`/`$HOME/ed.hup`, matching GNU
    /// ed's `sighup_handler`. Returns whether the save succeeded, which
    /// the caller turns into the process exit status (0/1).
    pub fn save_hangup_dump(&mut self) -> bool {
        if self.last_addr() == 0 {
            return true;
        }
        let path = crate::signal::hangup_path();
        self.write(1, self.last_addr(), &path, false).is_ok()
    }

    // ---- global command support ------------------------------------------

    pub fn is_in_global(&self) -> bool {
        self.in_global
    }

    pub fn enter_global(&mut self) -> EdResult<()> {
        if self.in_global {
            return Err(EdError::CannotNestGlobal);
        }
        self.in_global = true;
        Ok(())
    }

    pub fn exit_global(&mut self) {
        self.in_global = false;
        self.active.clear();
    }

    /// Builds the active set for `g`/`v`/`G`/`V`: every address in
    /// `first..=last` whose line matches `pattern` (or doesn't, when
    /// `match_sense` is false), compiling/caching `pattern` as the last
    /// search regex.
    pub fn build_active_set(&mut self, first: usize, last: usize, pattern: &mut &str, match_sense: bool) -> EdResult<()> {
        if self.last_addr() == 0 || first == 0 || first > last || last > self.last_addr() {
            return Err(EdError::InvalidAddress);
        }
        let re = self.regex.get_compiled_regex(pattern)?;
        self.active.clear();
        let mut h = self.buf.handle_at(first);
        for _ in first..=last {
            let text = self.buf.text(h, &mut self.store)?;
            if re.is_match(&text) == match_sense {
                self.active.push(h)?;
            }
            h = self.buf.next(h);
        }
        Ok(())
    }

    pub fn active_remaining(&self) -> bool {
        !self.active.is_empty()
    }

    /// Pops the next queued address from the active set, skipping entries
    /// whose line was deleted out from under the global command (the
    /// handle was already dropped from the set by `delete_lines`/
    /// `move_lines` at the time it happened, so this never dereferences a
    /// freed handle).
    pub fn next_active_addr(&mut self) -> Option<usize> {
        let h = self.active.next()?;
        Some(self.buf.address_of(h))
    }

    pub fn line_text(&mut self, addr: usize) -> EdResult<String> {
        self.require_address(addr)?;
        if addr == 0 {
            return Err(EdError::InvalidAddress);
        }
        let h = self.buf.handle_at(addr);
        self.buf.text(h, &mut self.store)
    }

    pub fn set_current_addr(&mut self, addr: usize) {
        self.current_addr = addr.min(self.last_addr());
    }

    // ---- error / quit bookkeeping -----------------------------------------

    pub fn last_error(&self) -> Option<&EdError> {
        self.last_error.as_ref()
    }

    pub fn set_last_error(&mut self, e: EdError) {
        self.last_error = Some(e);
    }

    /// `q`/`Q`/`e`/`E` refuse once on a modified buffer; repeating the
    /// same verb immediately overrides the guard. `take_emod_override`
    /// consumes the one-shot flag set by a prior refusal.
    pub fn note_emod_warning(&mut self) {
        self.emod_warned = true;
    }

    pub fn take_emod_override(&mut self) -> bool {
        std::mem::take(&mut self.emod_warned)
    }

    // ---- shell ---------------------------------------------------------

    pub fn last_shell_command(&self) -> Option<&str> {
        self.last_shell_cmd.as_deref()
    }

    pub fn set_last_shell_command(&mut self, cmd: String) {
        self.last_shell_cmd = Some(cmd);
    }

    /// Runs `cmd` through `/bin/sh -c`, inheriting stdio so the user sees
    /// its output and can interact with it directly (`!cmd`). Returns the
    /// process exit status.
    pub fn shell_execute(&mut self, cmd: &str) -> EdResult<std::process::ExitStatus> {
        if self.restricted {
            return Err(EdError::ShellAccessRestricted);
        }
        std::process::Command::new("/bin/sh")
            .arg("-c")
            .arg(cmd)
            .status()
            .map_err(|e| EdError::IoError(e.to_string(), "shell"))
    }

    /// `[addr,addr]!cmd`: filters a range of lines through `cmd`, replacing
    /// them with its stdout, matching GNU ed's line-filter form of `!`.
    pub fn filter_lines(&mut self, first: usize, last: usize, cmd: &str) -> EdResult<()> {
        if self.restricted {
            return Err(EdError::ShellAccessRestricted);
        }
        if first == 0 || first > last || last > self.last_addr() {
            return Err(EdError::InvalidAddress);
        }
        use std::io::Write as _;
        let mut child = std::process::Command::new("/bin/sh")
            .arg("-c")
            .arg(cmd)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .spawn()
            .map_err(|e| EdError::IoError(e.to_string(), "shell"))?;
        {
            let stdin = child.stdin.as_mut().ok_or(EdError::Fatal("shell stdin unavailable"))?;
            let mut h = self.buf.handle_at(first);
            for _ in first..=last {
                let text = self.buf.text(h, &mut self.store)?;
                writeln!(stdin, "{text}").map_err(|e| EdError::IoError(e.to_string(), "shell"))?;
                h = self.buf.next(h);
            }
        }
        let output = child.wait_with_output().map_err(|e| EdError::IoError(e.to_string(), "shell"))?;
        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        let new_lines: Vec<String> = if text.is_empty() {
            Vec::new()
        } else {
            let mut v: Vec<String> = text.split('\n').map(str::to_string).collect();
            if v.last().map(|s| s.is_empty()).unwrap_or(false) {
                v.pop();
            }
            v
        };
        self.begin_undo_frame();
        self.delete_lines_inner(first, last)?;
        self.append_lines_inner(first.saturating_sub(1), &new_lines)
    }

    /// Expands a shell-command or filename argument per SPEC_FULL.md §6:
    /// `\` escapes the following character literally, and a bare `%`
    /// (not escaped) expands to the current default filename.
    pub fn expand_percent(&self, arg: &str) -> EdResult<String> {
        let mut out = String::with_capacity(arg.len());
        let mut chars = arg.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                '%' => {
                    out.push_str(self.filename.as_deref().ok_or(EdError::NoCurrentFilename)?);
                }
                c => out.push(c),
            }
        }
        Ok(out)
    }

    /// Validates a filename against restricted-mode rules (no shell forms,
    /// no `/`, no `..`) per SPEC_FULL.md §6.
    pub fn validate_filename(&self, name: &str) -> EdResult<()> {
        if name.len() > 4096 {
            return Err(EdError::FilenameTooLong);
        }
        if self.restricted {
            if name.starts_with('!') {
                return Err(EdError::ShellAccessRestricted);
            }
            if name.contains('/') || name == ".." {
                return Err(EdError::DirectoryAccessRestricted);
            }
        }
        Ok(())
    }
}

impl AddressContext for Editor {
    fn current_addr(&self) -> usize {
        self.current_addr
    }

    fn last_addr(&self) -> usize {
        self.buf.len()
    }

    fn resolve_mark(&self, c: char) -> EdResult<usize> {
        self.resolve_mark_addr(c)
    }

    fn search(&mut self, forward: bool, input: &mut &str) -> EdResult<usize> {
        self.search_line(forward, input)
    }
}
