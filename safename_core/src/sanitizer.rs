//! Filename sanitizing for NTFS-backed download APIs.
//!
//! A name is rewritten in place: every code point that the target API would
//! reject is swapped for a replacement character, so the output has exactly as
//! many code points as the input. Sanitizing an already sanitized name returns
//! it unchanged.

use std::fmt;

use regex::{NoExpand, Regex};
use serde::Serialize;

use crate::config::{SanitizerConfig, SeparatorPolicy};
use crate::error::SafenameError;
use crate::rule::{Rule, Scanner, DEVICE_NAME, SCANNER, SCANNER_WITH_SEPARATORS};

/// A code point that the sanitizer replaces.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize)]
pub struct Violation {
    /// Index in code points, not bytes.
    pub index: usize,
    pub code_point: char,
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: U+{:04X} ({})", self.index, self.code_point as u32, self.rule.name())
    }
}

#[derive(Debug, Clone)]
pub struct Sanitizer {
    replacement: char,
    path_separators: SeparatorPolicy,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Sanitizer {
            replacement: '_',
            path_separators: SeparatorPolicy::Keep,
        }
    }
}

impl Sanitizer {
    pub fn new(config: &SanitizerConfig) -> Result<Self, SafenameError> {
        let replacement = config.replacement;

        // An alphanumeric replacement could spell a device name out of replaced code points.
        if replacement.is_ascii_alphanumeric()
            || replacement == '/'
            || replacement == '\\'
            || !DEFAULT.is_valid(replacement.encode_utf8(&mut [0; 4]))
        {
            return Err(SafenameError::InvalidReplacement(replacement));
        }

        Ok(Sanitizer {
            replacement,
            path_separators: config.path_separators,
        })
    }

    pub fn replacement(&self) -> char {
        self.replacement
    }

    pub fn path_separators(&self) -> SeparatorPolicy {
        self.path_separators
    }

    fn scanner(&self) -> &'static Scanner {
        match self.path_separators {
            SeparatorPolicy::Keep => &*SCANNER,
            SeparatorPolicy::Replace => &*SCANNER_WITH_SEPARATORS,
        }
    }

    /// Replace a leading device name (`CON`, `lpt9`, ...) one code point at a time.
    fn replace_device_name(&self, name: &str) -> Option<String> {
        let caps = DEVICE_NAME.captures(name)?;
        let device = caps.get(1)?;

        let mut out = String::with_capacity(name.len());
        out.extend(std::iter::repeat(self.replacement).take(device.as_str().chars().count()));
        out.push_str(&name[device.end()..]);
        Some(out)
    }

    /// Sanitize a candidate filename.
    ///
    /// The device name prefix is replaced first, then control, reserved,
    /// format and unassigned code points anywhere, and NUL, separators and
    /// `.` at the first or last position, in a single scan.
    pub fn sanitize(&self, name: &str) -> String {
        let renamed = self.replace_device_name(name);
        let stage: &str = renamed.as_deref().unwrap_or(name);

        let mut buf = [0; 4];
        let replacement: &str = self.replacement.encode_utf8(&mut buf);
        let regex: &Regex = &self.scanner().regex;
        let sanitized = regex.replace_all(stage, NoExpand(replacement)).into_owned();

        if sanitized != name {
            debug!("sanitized {:?} -> {:?}", name, sanitized);
        }

        sanitized
    }

    /// List every code point `sanitize` would replace, in index order.
    pub fn check(&self, name: &str) -> Vec<Violation> {
        let mut violations = Vec::new();

        if let Some(device) = DEVICE_NAME.captures(name).and_then(|caps| caps.get(1)) {
            for (index, code_point) in device.as_str().chars().enumerate() {
                violations.push(Violation {
                    index,
                    code_point,
                    rule: Rule::DeviceName,
                });
            }
        }

        let scanner = self.scanner();
        let mut offset = 0;
        let mut index = 0;

        for caps in scanner.regex.captures_iter(name) {
            if let Some((m, rule)) = scanner.rule_of(&caps) {
                index += name[offset..m.start()].chars().count();
                offset = m.start();

                if let Some(code_point) = m.as_str().chars().next() {
                    violations.push(Violation { index, code_point, rule });
                }
            }
        }

        violations
    }

    pub fn is_valid(&self, name: &str) -> bool {
        !DEVICE_NAME.is_match(name) && !self.scanner().regex.is_match(name)
    }

    /// Rule that replaces `c` when it is the whole name, if any.
    pub fn classify(&self, c: char) -> Option<Rule> {
        let mut buf = [0; 4];
        self.scanner().classify(c.encode_utf8(&mut buf))
    }
}

lazy_static! {
    static ref DEFAULT: Sanitizer = Sanitizer::default();
}

/// Sanitize with the default rules and `_` as replacement.
pub fn sanitize(name: &str) -> String {
    DEFAULT.sanitize(name)
}

pub fn check(name: &str) -> Vec<Violation> {
    DEFAULT.check(name)
}

pub fn is_valid(name: &str) -> bool {
    DEFAULT.is_valid(name)
}
