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

//! There is no library target to link against (`ed-rust` is bin-only, like
//! the teacher it started from), so these benchmarks drive the compiled
//! binary as a subprocess through `CARGO_BIN_EXE_ed-rust`, the same way the
//! smoke test in `tests/differential_containerized.rs` does.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::io::Write;
use std::process::{Command, Stdio};

fn run_script(lines: usize, script: &str) {
    let mut input = tempfile::NamedTempFile::new().expect("tempfile");
    for n in 0..lines {
        writeln!(input, "line {n}").unwrap();
    }

    let mut child = Command::new(env!("CARGO_BIN_EXE_ed-rust"))
        .arg("-s")
        .arg(input.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn ed-rust");

    child.stdin.take().unwrap().write_all(script.as_bytes()).expect("write stdin");
    child.wait().expect("wait");
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    for &n in &[100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let script: String = (0..n).map(|i| format!("a\nappended {i}\n.\n")).collect::<Vec<_>>().join("")
                + "q\n";
            b.iter(|| run_script(1, &script));
        });
    }
    group.finish();
}

fn bench_global_substitute(c: &mut Criterion) {
    let mut group = c.benchmark_group("global_substitute");
    for &n in &[100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| run_script(n, "g/line/s//LINE/\nw\nq\n"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_append, bench_global_substitute);
criterion_main!(benches);
