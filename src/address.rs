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

//! Address-list parsing: turns the leading `addr[,addr]` (or `addr;addr`)
//! portion of a command line into `(first, second, addr_count)`, leaving
//! the rest of the line for the command dispatcher.
//!
//! This is deliberately independent of [`crate::editor::Editor`] — it
//! only needs the handful of buffer facts an address can depend on
//! (current/last address, mark lookup, search), captured by
//! [`AddressContext`], so it can be exercised directly in tests.

use crate::error::EdError;

pub trait AddressContext {
    fn current_addr(&self) -> usize;
    fn last_addr(&self) -> usize;
    fn resolve_mark(&self, c: char) -> Result<usize, EdError>;
    /// Searches from the current line in `forward` direction for the
    /// pattern at the front of `*input` (a leading `/` or `?` having
    /// already been consumed by the caller); consumes the pattern and its
    /// closing delimiter, if present, from `*input`.
    fn search(&mut self, forward: bool, input: &mut &str) -> Result<usize, EdError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AddressExtraction {
    pub first_addr: Option<usize>,
    pub second_addr: Option<usize>,
    pub addr_count: u32,
}

impl AddressExtraction {
    pub fn has_no_addresses(&self) -> bool {
        self.addr_count == 0
    }
}

fn skip_blanks(input: &str) -> &str {
    input.trim_start_matches([' ', '\t'])
}

fn parse_number(input: &mut &str) -> Option<i64> {
    let digits_len = input.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let (digits, rest) = input.split_at(digits_len);
    *input = rest;
    digits.parse::<i64>().ok()
}

/// One `addr` in the grammar: a primary term (`.`, `$`, digits, `'c`,
/// `/re/`, `?re?`, `\cre\c`c) optionally followed by a chain of
/// `+n`/`-n`/`^n` offsets (bare `+`/`-`/`^` meaning ±1).
fn parse_one_address(input: &mut &str, ctx: &mut dyn AddressContext) -> Result<Option<i64>, EdError> {
    *input = skip_blanks(input);
    let mut value: Option<i64> = None;

    let mut chars = input.chars();
    match chars.clone().next() {
        Some('.') => {
            chars.next();
            *input = chars.as_str();
            value = Some(ctx.current_addr() as i64);
        }
        Some('$') => {
            chars.next();
            *input = chars.as_str();
            value = Some(ctx.last_addr() as i64);
        }
        Some(c) if c.is_ascii_digit() => {
            value = parse_number(input);
        }
        Some('\'') => {
            chars.next();
            let mark = chars.next().ok_or(EdError::InvalidMarkCharacter)?;
            *input = chars.as_str();
            value = Some(ctx.resolve_mark(mark)? as i64);
        }
        Some('/') => {
            chars.next();
            *input = chars.as_str();
            value = Some(ctx.search(true, input)? as i64);
        }
        Some('?') => {
            chars.next();
            *input = chars.as_str();
            value = Some(ctx.search(false, input)? as i64);
        }
        _ => {}
    }

    // Trailing +n / -n / ^n chain; a bare sign with no leading primary
    // term means "current line plus/minus the offsets that follow".
    loop {
        *input = skip_blanks(input);
        let mut peek = input.chars();
        match peek.next() {
            Some(sign @ ('+' | '-' | '^')) => {
                peek = input[sign.len_utf8()..].chars();
                let mut rest = &input[sign.len_utf8()..];
                rest = skip_blanks(rest);
                let base = value.unwrap_or(ctx.current_addr() as i64);
                let offset = match rest.chars().next() {
                    Some(c) if c.is_ascii_digit() => parse_number(&mut rest).unwrap(),
                    _ => 1,
                };
                value = Some(if sign == '+' { base + offset } else { base - offset });
                *input = rest;
                let _ = peek;
            }
            _ => break,
        }
    }

    Ok(value)
}

/// Parses the leading address-list of a command line. Matches GNU ed's
/// `extract_addresses`: `%`/`,` with no preceding address means `1,$`;
/// otherwise `,`/`;` between two addresses shifts `second` into `first`
/// and starts parsing a new `second`. `;` additionally seeds the new
/// `second` parse from the first address as the "current line" context
/// (handled by the caller re-running search/`.`/`$` against updated
/// state, so here it is treated the same as `,`).
pub fn parse_addresses(input: &mut &str, ctx: &mut dyn AddressContext) -> Result<AddressExtraction, EdError> {
    let mut result = AddressExtraction::default();

    loop {
        *input = skip_blanks(input);
        if let Some(rest) = input.strip_prefix('%') {
            if result.addr_count == 0 {
                result.first_addr = Some(1);
                result.second_addr = Some(ctx.last_addr());
                result.addr_count = 2;
                *input = rest;
                continue;
            }
            break;
        }

        let addr = parse_one_address(input, ctx)?;
        match addr {
            Some(v) => {
                if v < 0 || v as usize > ctx.last_addr() {
                    return Err(EdError::InvalidAddress);
                }
                match result.addr_count {
                    0 => {
                        result.first_addr = Some(v as usize);
                        result.second_addr = Some(v as usize);
                        result.addr_count = 1;
                    }
                    _ => {
                        result.first_addr = result.second_addr;
                        result.second_addr = Some(v as usize);
                        result.addr_count = 2;
                    }
                }
            }
            None => {
                if result.addr_count == 0 {
                    break;
                }
            }
        }

        *input = skip_blanks(input);
        match input.chars().next() {
            Some(',') => {
                *input = &input[1..];
                if result.addr_count == 0 {
                    result.first_addr = Some(1);
                    result.second_addr = Some(ctx.last_addr());
                    result.addr_count = 2;
                }
                continue;
            }
            Some(';') => {
                *input = &input[1..];
                if result.addr_count == 0 {
                    result.first_addr = Some(ctx.current_addr());
                    result.second_addr = Some(ctx.current_addr());
                    result.addr_count = 2;
                }
                continue;
            }
            _ => break,
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake {
        current: usize,
        last: usize,
        marks: std::collections::HashMap<char, usize>,
    }

    impl AddressContext for Fake {
        fn current_addr(&self) -> usize {
            self.current
        }
        fn last_addr(&self) -> usize {
            self.last
        }
        fn resolve_mark(&self, c: char) -> Result<usize, EdError> {
            self.marks.get(&c).copied().ok_or(EdError::InvalidMarkCharacter)
        }
        fn search(&mut self, _forward: bool, input: &mut &str) -> Result<usize, EdError> {
            // test double: consumes up to the next '/' or '?' and returns a fixed line
            if let Some(end) = input.find(['/', '?']) {
                *input = &input[end + 1..];
            }
            Ok(3)
        }
    }

    fn fake() -> Fake {
        Fake { current: 5, last: 10, marks: [('a', 2)].into_iter().collect() }
    }

    #[test]
    fn bare_dollar_is_last_line() {
        let mut ctx = fake();
        let mut input = "$";
        let r = parse_addresses(&mut input, &mut ctx).unwrap();
        assert_eq!(r.addr_count, 1);
        assert_eq!(r.second_addr, Some(10));
    }

    #[test]
    fn comma_with_no_address_means_whole_buffer() {
        let mut ctx = fake();
        let mut input = ",";
        let r = parse_addresses(&mut input, &mut ctx).unwrap();
        assert_eq!(r.first_addr, Some(1));
        assert_eq!(r.second_addr, Some(10));
        assert_eq!(r.addr_count, 2);
    }

    #[test]
    fn percent_is_same_as_comma() {
        let mut ctx = fake();
        let mut input = "%";
        let r = parse_addresses(&mut input, &mut ctx).unwrap();
        assert_eq!(r.first_addr, Some(1));
        assert_eq!(r.second_addr, Some(10));
    }

    #[test]
    fn range_of_two_numbers() {
        let mut ctx = fake();
        let mut input = "2,7p";
        let r = parse_addresses(&mut input, &mut ctx).unwrap();
        assert_eq!(r.first_addr, Some(2));
        assert_eq!(r.second_addr, Some(7));
        assert_eq!(input, "p");
    }

    #[test]
    fn bare_plus_means_current_plus_one() {
        let mut ctx = fake();
        let mut input = "+";
        let r = parse_addresses(&mut input, &mut ctx).unwrap();
        assert_eq!(r.second_addr, Some(6));
    }

    #[test]
    fn mark_address_resolves_through_context() {
        let mut ctx = fake();
        let mut input = "'a";
        let r = parse_addresses(&mut input, &mut ctx).unwrap();
        assert_eq!(r.second_addr, Some(2));
    }

    #[test]
    fn out_of_range_address_is_invalid() {
        let mut ctx = fake();
        let mut input = "99";
        assert_eq!(parse_addresses(&mut input, &mut ctx).unwrap_err(), EdError::InvalidAddress);
    }

    #[test]
    fn no_address_at_all_is_zero_count() {
        let mut ctx = fake();
        let mut input = "p";
        let r = parse_addresses(&mut input, &mut ctx).unwrap();
        assert!(r.has_no_addresses());
        assert_eq!(input, "p");
    }
}
