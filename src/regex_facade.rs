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

//! Pattern matching and substitution, wrapping the `regex` crate.
//!
//! Holds exactly two compiled patterns — the last one used for a search
//! (`/re/`, `g/re/`) and the last one used for a substitution (`s/re/.../`)
//! — plus the saved replacement template, mirroring GNU ed's
//! `last_regexp`/`subst_regexp`/`rbuf` globals but as fields on the caller
//! (`Editor`) instead of process statics.

use crate::error::EdError;
use regex::{Regex, RegexBuilder};

pub struct RegexFacade {
    last: Option<Regex>,
    subst: Option<Regex>,
    replacement: String,
}

impl RegexFacade {
    pub fn new() -> Self {
        RegexFacade { last: None, subst: None, replacement: String::new() }
    }

    pub fn last(&self) -> Option<&Regex> {
        self.last.as_ref()
    }

    fn is_lf_or_nul(c: char) -> bool {
        c == '\n' || c == '\0'
    }

    /// Scans a `[...]` bracket expression starting just after the opening
    /// `[`, returning the index of its closing `]` relative to the slice
    /// passed in. Handles `[:class:]`, `[.collating.]`, `[=equiv=]` forms
    /// and a leading `^`/`]`.
    fn scan_char_class(s: &str) -> Option<usize> {
        let chars: Vec<char> = s.chars().collect();
        let mut i = 0;
        if i < chars.len() && chars[i] == '^' {
            i += 1;
        }
        if i < chars.len() && chars[i] == ']' {
            i += 1;
        }
        while i < chars.len() && chars[i] != ']' && !Self::is_lf_or_nul(chars[i]) {
            if chars[i] == '[' && i + 1 < chars.len() {
                let marker = chars[i + 1];
                if marker == '.' || marker == ':' || marker == '=' {
                    i += 2;
                    while i < chars.len() && !(chars[i] == marker && i + 1 < chars.len() && chars[i + 1] == ']') {
                        if Self::is_lf_or_nul(chars[i]) {
                            return None;
                        }
                        i += 1;
                    }
                    i += 1; // the marker char itself; the ']' is consumed below
                }
            }
            i += 1;
        }
        if i < chars.len() && chars[i] == ']' {
            Some(i)
        } else {
            None
        }
    }

    /// Extracts a pattern terminated by `delimiter`, honoring bracket
    /// expressions and backslash escapes so the delimiter can appear
    /// literally inside either. Advances `*input` past the pattern (not
    /// past the delimiter itself).
    pub fn extract_pattern(input: &mut &str, delimiter: char) -> Result<String, EdError> {
        let chars: Vec<char> = input.chars().collect();
        let mut i = 0;
        while i < chars.len() && chars[i] != delimiter && !Self::is_lf_or_nul(chars[i]) {
            if chars[i] == '[' {
                let rest: String = chars[i + 1..].iter().collect();
                match Self::scan_char_class(&rest) {
                    Some(end) => i += end + 2,
                    None => return Err(EdError::UnbalancedBrackets),
                }
            } else if chars[i] == '\\' {
                i += 1;
                if i >= chars.len() || Self::is_lf_or_nul(chars[i]) {
                    return Err(EdError::TrailingBackslash);
                }
                i += 1;
            } else {
                i += 1;
            }
        }
        let pattern: String = chars[..i].iter().collect();
        *input = &input[pattern.len()..];
        Ok(pattern)
    }

    /// Translates a POSIX basic-regular-expression pattern, as GNU ed
    /// accepts it, into the syntax the `regex` crate understands (which is
    /// ERE-like already); BRE's `\(`/`\)`/`\{`/`\}`/`\|`/`\+`/`\?` become
    /// the unescaped metacharacters and literal `(`, `)`, `{`, `}` need
    /// escaping instead.
    pub fn translate_bre(pattern: &str) -> String {
        let mut out = String::with_capacity(pattern.len());
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c == '\\' && i + 1 < chars.len() {
                let next = chars[i + 1];
                match next {
                    '(' | ')' | '{' | '}' | '|' | '+' | '?' => {
                        out.push(next);
                        i += 2;
                        continue;
                    }
                    _ => {
                        out.push('\\');
                        out.push(next);
                        i += 2;
                        continue;
                    }
                }
            }
            if matches!(c, '(' | ')' | '{' | '}' | '|' | '+' | '?') {
                out.push('\\');
                out.push(c);
            } else {
                out.push(c);
            }
            i += 1;
        }
        out
    }

    fn compile(&mut self, pattern: &str, ignore_case: bool) -> Result<Regex, EdError> {
        let translated = Self::translate_bre(pattern);
        let re = RegexBuilder::new(&translated).case_insensitive(ignore_case).build().map_err(|e| {
            log::debug!("regex compile failed for {translated:?}: {e}");
            EdError::RegexError(e.to_string())
        })?;
        self.last = Some(re.clone());
        Ok(re)
    }

    /// Parses a delimited search pattern (the `/re/` or `?re?` form used
    /// by addresses and `g`/`v`), compiling and caching it as `last`.
    /// An empty pattern (`//`) reuses the cached `last` regex.
    pub fn get_compiled_regex(&mut self, input: &mut &str) -> Result<Regex, EdError> {
        let mut chars = input.chars();
        let delimiter = chars.next().ok_or(EdError::InvalidPatternDelimiter)?;
        if delimiter == ' ' || Self::is_lf_or_nul(delimiter) {
            return Err(EdError::InvalidPatternDelimiter);
        }
        *input = chars.as_str();

        let empty = input.is_empty() || input.starts_with(delimiter) || input.starts_with(['\n', '\0']);
        if empty {
            if input.starts_with(delimiter) {
                *input = &input[delimiter.len_utf8()..];
                if input.starts_with('I') {
                    return Err(EdError::InvalidIgnoreCaseSuffix);
                }
            }
            return self.last.clone().ok_or(EdError::NoPreviousPattern);
        }

        let pattern = Self::extract_pattern(input, delimiter)?;
        let mut ignore_case = false;
        if input.starts_with(delimiter) {
            *input = &input[delimiter.len_utf8()..];
            if input.starts_with('I') {
                ignore_case = true;
                *input = &input[1..];
            }
        }
        self.compile(&pattern, ignore_case)
    }

    /// Parses the pattern half of an `s///` command: like
    /// `get_compiled_regex` but returns the raw (possibly empty) pattern
    /// text for the caller to compile as the substitution regex, and
    /// requires the closing delimiter to actually be present.
    pub fn get_pattern_for_s(&self, input: &mut &str) -> Result<String, EdError> {
        let mut chars = input.chars();
        let delimiter = chars.next().ok_or(EdError::InvalidPatternDelimiter)?;
        if delimiter == ' ' || delimiter == '\n' {
            return Err(EdError::InvalidPatternDelimiter);
        }
        *input = chars.as_str();

        if input.starts_with(delimiter) {
            if self.last.is_none() {
                return Err(EdError::NoPreviousPattern);
            }
            return Ok(String::new());
        }

        let pattern = Self::extract_pattern(input, delimiter)?;
        if !input.starts_with(delimiter) {
            return Err(EdError::MissingPatternDelimiter);
        }
        Ok(pattern)
    }

    /// Compiles and stores the substitution regex (empty `pattern` reuses
    /// `last`).
    pub fn set_subst_regex(&mut self, pattern: &str, ignore_case: bool) -> Result<(), EdError> {
        if pattern.is_empty() && ignore_case {
            return Err(EdError::InvalidIgnoreCaseSuffix);
        }
        let re = if pattern.is_empty() {
            self.last.clone().ok_or(EdError::NoPreviousPattern)?
        } else {
            self.compile(pattern, ignore_case)?
        };
        self.subst = Some(re);
        Ok(())
    }

    pub fn replace_subst_re_by_search_re(&mut self) -> Result<(), EdError> {
        self.subst = Some(self.last.clone().ok_or(EdError::NoPreviousPattern)?);
        Ok(())
    }

    /// Parses the replacement half of an `s///` command. `%` alone reuses
    /// the previously saved template.
    pub fn extract_replacement(&mut self, input: &mut &str, is_global: bool) -> Result<(), EdError> {
        let mut chars = input.chars();
        let delimiter = chars.next().ok_or(EdError::MissingPatternDelimiter)?;
        *input = chars.as_str();

        if input.starts_with('%') {
            let after_pct = &input[1..];
            let next = after_pct.chars().next();
            if next == Some(delimiter) || (next == Some('\n') && (!is_global || after_pct.len() == 1)) {
                *input = after_pct;
                if self.replacement.is_empty() {
                    return Err(EdError::NoPreviousSubstitution);
                }
                return Ok(());
            }
        }

        let mut out = String::new();
        let bytes: Vec<char> = input.chars().collect();
        let mut i = 0;
        while i < bytes.len() && bytes[i] != delimiter {
            if bytes[i] == '\n' && (!is_global || i + 1 >= bytes.len()) {
                break;
            }
            out.push(bytes[i]);
            i += 1;
        }
        let consumed: String = bytes[..i].iter().collect();
        *input = &input[consumed.len()..];
        self.replacement = out;
        Ok(())
    }

    /// Expands the saved replacement template against a completed match,
    /// honoring `&` (whole match) and `\1`-`\9` (capture groups) and `\\`
    /// (literal backslash); any other `\x` keeps `x` literally, matching
    /// GNU ed.
    fn expand_template(&self, caps: &regex::Captures) -> String {
        let mut out = String::new();
        let template: Vec<char> = self.replacement.chars().collect();
        let mut i = 0;
        while i < template.len() {
            match template[i] {
                '&' => {
                    if let Some(m) = caps.get(0) {
                        out.push_str(m.as_str());
                    }
                    i += 1;
                }
                '\\' if i + 1 < template.len() => {
                    let next = template[i + 1];
                    if next.is_ascii_digit() {
                        let n = next.to_digit(10).unwrap() as usize;
                        if let Some(m) = caps.get(n) {
                            out.push_str(m.as_str());
                        }
                    } else {
                        out.push(next);
                    }
                    i += 2;
                }
                c => {
                    out.push(c);
                    i += 1;
                }
            }
        }
        out
    }

    /// Applies the substitution regex to `line`. `snum <= 0` means replace
    /// every match (`g` suffix); `snum > 0` replaces only the `snum`-th
    /// match. Returns `Some(new_text)` if anything changed, `None`
    /// otherwise. A zero-width match is only ever consumed once per
    /// position; a second zero-width match at the same cursor position is
    /// reported as [`EdError::InfiniteSubstitutionLoop`] instead of
    /// looping forever.
    pub fn substitute(&self, line: &str, snum: i32) -> Result<Option<String>, EdError> {
        let re = self.subst.as_ref().ok_or(EdError::NoPreviousSubstitution)?;
        let global = snum <= 0;
        let mut out = String::with_capacity(line.len());
        let mut last_end = 0;
        let mut count = 0;
        let mut changed = false;
        let mut last_empty_at: Option<usize> = None;

        for caps in re.captures_iter(line) {
            let m = caps.get(0).unwrap();
            if m.start() < last_end {
                continue;
            }
            count += 1;
            let apply = global || count == snum;

            out.push_str(&line[last_end..m.start()]);
            if apply {
                out.push_str(&self.expand_template(&caps));
                changed = true;
            } else {
                out.push_str(m.as_str());
            }

            if m.start() == m.end() {
                if last_empty_at == Some(m.start()) {
                    return Err(EdError::InfiniteSubstitutionLoop);
                }
                last_empty_at = Some(m.start());
                // advance one char past a zero-width match so the scan
                // can't stall at the same position forever
                if let Some(ch) = line[m.end()..].chars().next() {
                    out.push(ch);
                    last_end = m.end() + ch.len_utf8();
                } else {
                    last_end = m.end();
                    break;
                }
            } else {
                last_end = m.end();
                last_empty_at = None;
            }

            if !global && count >= snum.max(1) {
                break;
            }
        }
        out.push_str(&line[last_end..]);

        Ok(if changed { Some(out) } else { None })
    }
}

impl Default for RegexFacade {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_compiled_regex_parses_delimited_pattern() {
        let mut facade = RegexFacade::new();
        let mut input = "/foo/bar";
        let re = facade.get_compiled_regex(&mut input).unwrap();
        assert!(re.is_match("foobar"));
        assert_eq!(input, "bar");
    }

    #[test]
    fn empty_pattern_reuses_last() {
        let mut facade = RegexFacade::new();
        let mut input = "/foo/";
        facade.get_compiled_regex(&mut input).unwrap();
        let mut input2 = "//";
        let re = facade.get_compiled_regex(&mut input2).unwrap();
        assert!(re.is_match("foo"));
    }

    #[test]
    fn empty_pattern_without_prior_search_errors() {
        let mut facade = RegexFacade::new();
        let mut input = "//";
        assert_eq!(facade.get_compiled_regex(&mut input).unwrap_err(), EdError::NoPreviousPattern);
    }

    #[test]
    fn substitute_replaces_first_match_only_without_g() {
        let mut facade = RegexFacade::new();
        facade.set_subst_regex("o", false).unwrap();
        facade.replacement = "0".to_string();
        let result = facade.substitute("foo boo", 0).unwrap();
        assert_eq!(result, Some("f0o b0o".to_string()));
    }

    #[test]
    fn substitute_nth_occurrence() {
        let mut facade = RegexFacade::new();
        facade.set_subst_regex("o", false).unwrap();
        facade.replacement = "0".to_string();
        let result = facade.substitute("foo boo", 2).unwrap();
        assert_eq!(result, Some("fo0 boo".to_string()));
    }

    #[test]
    fn substitute_ampersand_template() {
        let mut facade = RegexFacade::new();
        facade.set_subst_regex("wor(l)d", false).unwrap();
        facade.replacement = "[&]-\\1".to_string();
        let result = facade.substitute("hello world", 0).unwrap();
        assert_eq!(result, Some("hello [world]-l".to_string()));
    }

    #[test]
    fn substitute_with_no_match_returns_none() {
        let mut facade = RegexFacade::new();
        facade.set_subst_regex("zzz", false).unwrap();
        facade.replacement = "x".to_string();
        assert_eq!(facade.substitute("hello", 0).unwrap(), None);
    }
}
