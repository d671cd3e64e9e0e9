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

//! Entry point: parses arguments, loads the initial file (if any), installs
//! signal handlers, and drives the read-execute-report loop that feeds each
//! line to [`dispatcher::run_one`].

mod address;
mod buffer;
mod config;
mod dispatcher;
mod editor;
mod error;
mod global;
mod highlight;
mod io;
mod marks;
mod regex_facade;
mod scratch;
mod signal;
mod undo;

use clap::Parser;
use config::Config;
use editor::Editor;
use error::EdError;
use std::io::{BufRead, Write};
use std::process::ExitCode;

/// A raw pointer to the single-threaded `Editor`, wrapped so the hangup
/// writer closure registered with `signal::register_hangup_writer` can
/// satisfy its `Send + Sync` bound. Only ever invoked from the SIGHUP
/// handler on the same thread that owns `editor`, never concurrently with
/// the command loop's own use of it (the handler only fires between lines,
/// never inside a `SignalGuard::enter()` critical section).
struct EditorPtr(*mut Editor);
unsafe impl Send for EditorPtr {}
unsafe impl Sync for EditorPtr {}

fn init_logging(config: &Config) {
    let level = if config.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    env_logger::Builder::from_default_env().filter_module("ed_rust", level).try_init().ok();
}

/// Parses a leading `+line`, `+/RE`, or `+?RE` prefix off the file argument,
/// returning the remaining filename and the command to run against it once
/// loaded (e.g. `"42"`, `"/needle"`, `"?needle"`).
fn split_initial_command(file: &str) -> (&str, Option<&str>) {
    match file.strip_prefix('+') {
        Some(rest) if !rest.is_empty() => (rest, Some(rest)),
        _ => (file, None),
    }
}

fn report_error(editor: &mut Editor, e: EdError) {
    if !e.is_quit() {
        if editor.verbose {
            eprintln!("{e}");
        } else {
            eprintln!("?");
        }
        editor.set_last_error(e);
    }
}

fn run(config: Config) -> ExitCode {
    init_logging(&config);
    signal::install_handlers();

    let mut editor = match Editor::new(&config) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut initial_error = false;
    let mut initial_command: Option<String> = None;

    if let Some(file) = config.file.as_deref() {
        let (path, cmd) = split_initial_command(file);
        initial_command = cmd.map(str::to_string);
        if !path.starts_with('!') {
            if let Err(e) = editor.validate_filename(path) {
                eprintln!("{e}");
                initial_error = true;
            }
        }
        if !initial_error {
            match editor.read(0, path) {
                Ok(bytes) => {
                    editor.set_filename(path.to_string());
                    if !config.script {
                        println!("{bytes}");
                    }
                }
                Err(e) => {
                    eprintln!("{e}");
                    initial_error = true;
                }
            }
        }
    }

    {
        let editor_ptr = EditorPtr(&mut editor as *mut Editor);
        signal::register_hangup_writer(move || {
            let editor_ptr = &editor_ptr;
            let editor = unsafe { &mut *editor_ptr.0 };
            if !editor.save_hangup_dump() {
                std::process::exit(1);
            }
        });
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Some(addr_cmd) = initial_command {
        if let Err(e) = dispatcher::run_one(&mut editor, &addr_cmd, &mut input, &mut out) {
            report_error(&mut editor, e);
            initial_error = true;
        }
    }

    let mut exit_code = if initial_error { 2 } else { 0 };

    loop {
        if editor.prompt_on && !config.script {
            print!("{}", editor.prompt);
            let _ = std::io::stdout().flush();
        }
        let line = match io::read_stdin_line(&mut input) {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                report_error(&mut editor, e);
                continue;
            }
        };
        match dispatcher::run_one(&mut editor, &line, &mut input, &mut out) {
            Ok(()) => {}
            Err(e) if e.is_quit() => {
                exit_code = e.exit_code();
                break;
            }
            Err(e) => {
                exit_code = e.exit_code();
                report_error(&mut editor, e);
            }
        }
    }

    let _ = out.flush();
    if config.loose_exit_status {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(exit_code as u8)
    }
}

fn main() -> ExitCode {
    let config = Config::parse();
    run(config)
}
