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

//! Signal guard and window-size tracking.
//!
//! Real delivery of SIGHUP/SIGINT/SIGWINCH can only touch async-signal-safe
//! state, so the handlers here do nothing but flip an `AtomicBool`. All of
//! the actual work (saving `ed.hup`, unwinding the command loop, resizing
//! the scroll/column counters) happens synchronously, either at the next
//! `enable()` or at the top of the command loop, which is why those flags
//! are the only pieces of editor state that remain process statics instead
//! of living on `Editor` (see SPEC_FULL.md §9).

use crate::error::EdError;
use std::env;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

static MUTEX: AtomicI32 = AtomicI32::new(0);
static SIGHUP_PENDING: AtomicBool = AtomicBool::new(false);
static SIGINT_PENDING: AtomicBool = AtomicBool::new(false);
static WINCH_PENDING: AtomicBool = AtomicBool::new(false);

static WINDOW_LINES: AtomicI32 = AtomicI32::new(22);
static WINDOW_COLUMNS: AtomicI32 = AtomicI32::new(72);
static USER_LINES: AtomicI32 = AtomicI32::new(-1);

/// RAII token for a critical section: construct with `SignalGuard::enter()`,
/// drop it (or call `leave()`) to replay any signal that arrived while held.
/// Every structural mutation of the line sequence, yank buffer, undo stack,
/// active set, or regex cache slots should be wrapped in one of these.
pub struct SignalGuard;

impl SignalGuard {
    pub fn enter() -> Self {
        MUTEX.fetch_add(1, Ordering::SeqCst);
        SignalGuard
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        if MUTEX.fetch_sub(1, Ordering::SeqCst) == 1 {
            // replay order matches signal.c: hangup then interrupt
            if SIGHUP_PENDING.swap(false, Ordering::SeqCst) {
                let _ = save_hangup_dump();
            }
            // interrupt is surfaced via `take_pending_interrupt`, not replayed here
        }
    }
}

/// Checked at I/O boundaries and at the top of the command loop in place of
/// the teacher's `longjmp`-based cancellation.
pub fn take_pending_interrupt() -> Option<EdError> {
    if SIGINT_PENDING.swap(false, Ordering::SeqCst) {
        Some(EdError::Interrupt)
    } else {
        None
    }
}

pub fn take_pending_winch() -> bool {
    WINCH_PENDING.swap(false, Ordering::SeqCst)
}

fn masked() -> bool {
    MUTEX.load(Ordering::SeqCst) > 0
}

/// Installs real signal handlers. Handlers only set atomics; safe to call
/// once from `main`.
#[cfg(unix)]
pub fn install_handlers() {
    use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

    extern "C" fn on_hup(_: i32) {
        if masked() {
            SIGHUP_PENDING.store(true, Ordering::SeqCst);
        } else {
            SIGHUP_PENDING.store(false, Ordering::SeqCst);
            let _ = save_hangup_dump();
        }
    }
    log::debug!("installing SIGHUP/SIGINT/SIGWINCH/SIGPIPE handlers");
    extern "C" fn on_int(_: i32) {
        if masked() {
            SIGINT_PENDING.store(true, Ordering::SeqCst);
        } else {
            SIGINT_PENDING.store(true, Ordering::SeqCst);
        }
    }
    extern "C" fn on_winch(_: i32) {
        WINCH_PENDING.store(true, Ordering::SeqCst);
        refresh_window_size();
    }

    unsafe {
        let hup = SigAction::new(SigHandler::Handler(on_hup), SaFlags::empty(), SigSet::empty());
        let int = SigAction::new(SigHandler::Handler(on_int), SaFlags::empty(), SigSet::empty());
        let winch = SigAction::new(SigHandler::Handler(on_winch), SaFlags::empty(), SigSet::empty());
        let _ = signal::sigaction(Signal::SIGHUP, &hup);
        let _ = signal::sigaction(Signal::SIGINT, &int);
        let _ = signal::sigaction(Signal::SIGWINCH, &winch);
        let _ = signal::sigaction(
            Signal::SIGPIPE,
            &SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty()),
        );
    }
}

#[cfg(not(unix))]
pub fn install_handlers() {}

/// Writes the current buffer to `ed.hup` or `$HOME/ed.hup`. Does not have
/// access to `Editor` (signal-handler constraint), so the real editor
/// registers its save routine once via `register_hangup_writer`.
fn save_hangup_dump() -> std::io::Result<()> {
    if let Some(writer) = HANGUP_WRITER.get() {
        writer();
    }
    Ok(())
}

use std::sync::OnceLock;
static HANGUP_WRITER: OnceLock<Box<dyn Fn() + Send + Sync>> = OnceLock::new();

/// The editor calls this once at startup with a closure that writes the
/// live buffer to `ed.hup`/`$HOME/ed.hup` and exits, matching GNU ed's
/// `sighup_handler`.
pub fn register_hangup_writer(f: impl Fn() + Send + Sync + 'static) {
    let _ = HANGUP_WRITER.set(Box::new(f));
}

pub fn home_directory() -> Option<String> {
    env::var("HOME").ok().filter(|s| !s.is_empty())
}

pub fn hangup_path() -> String {
    match home_directory() {
        Some(hd) if hd.ends_with('/') => format!("{hd}ed.hup"),
        Some(hd) => format!("{hd}/ed.hup"),
        None => "ed.hup".to_string(),
    }
}

pub fn set_window_lines(lines: i32) {
    USER_LINES.store(lines, Ordering::SeqCst);
}

pub fn window_columns() -> i32 {
    WINDOW_COLUMNS.load(Ordering::SeqCst)
}

pub fn window_lines() -> i32 {
    let user_lines = USER_LINES.load(Ordering::SeqCst);
    if user_lines > 0 {
        return user_lines;
    }
    if let Ok(lines_str) = env::var("LINES") {
        if let Ok(n) = lines_str.parse::<i32>() {
            if n > 0 {
                USER_LINES.store(n, Ordering::SeqCst);
                return n;
            }
        }
    }
    WINDOW_LINES.load(Ordering::SeqCst)
}

/// Re-reads the terminal size via `TIOCGWINSZ`, clamping per SPEC_FULL.md
/// §6: rows to [2, 600) become `window_lines = rows - 2`, cols to [8, 1800)
/// become `window_columns = cols - 8`.
#[cfg(unix)]
fn refresh_window_size() {
    use nix::libc::{ioctl, winsize, STDOUT_FILENO, TIOCGWINSZ};
    let mut ws = winsize { ws_row: 0, ws_col: 0, ws_xpixel: 0, ws_ypixel: 0 };
    let ok = unsafe { ioctl(STDOUT_FILENO, TIOCGWINSZ, &mut ws as *mut winsize) };
    if ok == 0 {
        if ws.ws_row > 2 && (ws.ws_row as i32) < 600 {
            WINDOW_LINES.store(ws.ws_row as i32 - 2, Ordering::SeqCst);
        }
        if ws.ws_col > 8 && (ws.ws_col as i32) < 1800 {
            WINDOW_COLUMNS.store(ws.ws_col as i32 - 8, Ordering::SeqCst);
        }
    }
}

#[cfg(not(unix))]
fn refresh_window_size() {}

/// `ensure(size)` growable-buffer primitive from SPEC_FULL.md §4.1: doubles
/// up to 1 KiB granules (minimum 512), rejects sizes past `i32::MAX`.
pub fn ensure_capacity(buf: &mut Vec<u8>, min_size: usize) -> Result<(), EdError> {
    if min_size >= i32::MAX as usize {
        return Err(EdError::LineTooLong);
    }
    if buf.capacity() < min_size {
        let rounded = if min_size < 512 {
            512
        } else {
            min_size.div_ceil(1024) * 1024
        };
        let _guard = SignalGuard::enter();
        buf.reserve(rounded - buf.capacity());
    }
    Ok(())
}
