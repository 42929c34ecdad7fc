use std::fmt;

use serde::Serialize;

use crate::rule::Rule;
use crate::sanitizer::Sanitizer;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    Anywhere,
    Boundary,
}

impl Placement {
    pub fn name(&self) -> &'static str {
        match *self {
            Placement::Anywhere => "anywhere",
            Placement::Boundary => "boundary",
        }
    }
}

/// Consecutive code points replaced under the same rule.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize)]
pub struct CodePointRange {
    pub start: u32,
    pub end: u32,
    pub placement: Placement,
    pub rule: Rule,
}

impl CodePointRange {
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&(c as u32))
    }
}

impl fmt::Display for CodePointRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.start == self.end {
            write!(f, "U+{:04X}", self.start)
        } else {
            write!(f, "U+{:04X}..U+{:04X}", self.start, self.end)
        }
    }
}

/// Walk every Unicode scalar value and group the ones `sanitizer` replaces.
///
/// The result depends on the Unicode tables bundled with the `regex` crate,
/// so it documents exactly which unassigned and format code points a given
/// build rejects.
pub fn disallowed_ranges(sanitizer: &Sanitizer) -> Vec<CodePointRange> {
    let mut ranges: Vec<CodePointRange> = Vec::new();

    for c in (0..=char::MAX as u32).filter_map(char::from_u32) {
        let code = c as u32;
        if code & 0xFFFF == 0 {
            trace!("scanning plane {}", code >> 16);
        }

        let rule = match sanitizer.classify(c) {
            Some(rule) => rule,
            None => continue,
        };
        let placement = match rule {
            Rule::Boundary => Placement::Boundary,
            _ => Placement::Anywhere,
        };

        match ranges.last_mut() {
            Some(last) if last.end + 1 == code && last.rule == rule => last.end = code,
            _ => ranges.push(CodePointRange {
                start: code,
                end: code,
                placement,
                rule,
            }),
        }
    }

    debug!("found {} disallowed ranges", ranges.len());
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::{SanitizerConfig, SeparatorPolicy};

    fn find(ranges: &[CodePointRange], c: char) -> Option<&CodePointRange> {
        ranges.iter().find(|range| range.contains(c))
    }

    #[test]
    fn ranges_cover_rules() {
        let ranges = disallowed_ranges(&Sanitizer::default());

        let nul = find(&ranges, '\u{0}').unwrap();
        assert_eq!((nul.start, nul.end, nul.placement), (0, 0, Placement::Boundary));

        let control = find(&ranges, '\u{1}').unwrap();
        assert_eq!((control.start, control.end), (0x01, 0x1F));
        assert_eq!(control.rule, Rule::Control);

        let c1 = find(&ranges, '\u{80}').unwrap();
        assert_eq!((c1.start, c1.end), (0x7F, 0x9F));

        assert_eq!(find(&ranges, ' ').unwrap().placement, Placement::Boundary);
        assert_eq!(find(&ranges, '\u{200D}').unwrap().rule, Rule::Format);
        assert_eq!(find(&ranges, '\u{FFFF}').unwrap().rule, Rule::Unassigned);

        assert!(find(&ranges, 'a').is_none());
        assert!(find(&ranges, '/').is_none());
        assert!(find(&ranges, '\u{E000}').is_none());
    }

    #[test]
    fn ranges_are_sorted_and_disjoint() {
        let ranges = disallowed_ranges(&Sanitizer::default());
        for pair in ranges.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
    }

    #[test]
    fn ranges_include_separators_when_replaced() {
        let config = SanitizerConfig {
            path_separators: SeparatorPolicy::Replace,
            ..SanitizerConfig::default()
        };
        let ranges = disallowed_ranges(&Sanitizer::new(&config).unwrap());
        assert_eq!(find(&ranges, '/').unwrap().rule, Rule::PathSeparator);
        assert_eq!(find(&ranges, '\\').unwrap().rule, Rule::PathSeparator);
    }

    #[test]
    fn range_display() {
        let range = CodePointRange {
            start: 0x80,
            end: 0x9F,
            placement: Placement::Anywhere,
            rule: Rule::Control,
        };
        assert_eq!(range.to_string(), "U+0080..U+009F");
        assert_eq!(range.len(), 32);
        assert_eq!(range.placement.name(), "anywhere");
        assert_eq!(Placement::Boundary.name(), "boundary");
    }
}
