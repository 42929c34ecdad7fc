use regex::{Regex, RegexSet};
use serde::Serialize;

/// Reason a code point is replaced.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    Control,
    ReservedCharacter,
    Format,
    Unassigned,
    PathSeparator,
    Boundary,
    DeviceName,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match *self {
            Rule::Control => "control",
            Rule::ReservedCharacter => "reserved-character",
            Rule::Format => "format",
            Rule::Unassigned => "unassigned",
            Rule::PathSeparator => "path-separator",
            Rule::Boundary => "boundary",
            Rule::DeviceName => "device-name",
        }
    }
}

/// Where an entry of the rule table applies.
#[derive(Debug, Copy, Clone)]
pub(crate) enum Pattern {
    /// Regex character class contents, disallowed at any index.
    Anywhere(&'static str),
    /// Regex character class contents, disallowed at the first and last index.
    Boundary(&'static str),
    /// Case-insensitive alternation anchored at the start, followed by `.` or end of name.
    Anchored(&'static str),
}

pub(crate) struct Entry {
    pub(crate) rule: Rule,
    pub(crate) pattern: Pattern,
}

/// U+0000 is handled by the boundary entry.
const CONTROL: &str = r"\x01-\x1F\x7F\x80-\x9F";
const RESERVED: &str = r#"?"*<>|:\~"#;
const FORMAT: &str = r"\p{Cf}";
const UNASSIGNED: &str = r"\p{Cn}";
const PATH_SEPARATORS: &str = r"/\\";
const BOUNDARY: &str = r"\x00\p{Zl}\p{Zp}\p{Zs}.";
const DEVICE_NAMES: &str = "CON|PRN|AUX|NUL|COM[1-9]|LPT[1-9]";

/// Ordered rule table. The device name entry runs first against the original
/// name, every other entry is folded into one scan.
pub(crate) const RULE_TABLE: &[Entry] = &[
    Entry { rule: Rule::DeviceName, pattern: Pattern::Anchored(DEVICE_NAMES) },
    Entry { rule: Rule::Control, pattern: Pattern::Anywhere(CONTROL) },
    Entry { rule: Rule::ReservedCharacter, pattern: Pattern::Anywhere(RESERVED) },
    Entry { rule: Rule::Format, pattern: Pattern::Anywhere(FORMAT) },
    Entry { rule: Rule::Unassigned, pattern: Pattern::Anywhere(UNASSIGNED) },
    Entry { rule: Rule::PathSeparator, pattern: Pattern::Anywhere(PATH_SEPARATORS) },
    Entry { rule: Rule::Boundary, pattern: Pattern::Boundary(BOUNDARY) },
];

/// Compiled single-pass scan over the position dependent entries.
///
/// Every alternative matches exactly one code point, and capture group `i + 1`
/// belongs to `rules[i]`, so the group that participates in a match names the
/// rule that classified that position.
pub(crate) struct Scanner {
    pub(crate) regex: Regex,
    pub(crate) rules: Vec<Rule>,
    set: RegexSet,
}

impl Scanner {
    fn new(table: &[Entry], path_separators: bool) -> Self {
        let mut alternatives: Vec<String> = Vec::new();
        let mut rules: Vec<Rule> = Vec::new();

        for entry in table {
            match entry.pattern {
                Pattern::Anywhere(_) if entry.rule == Rule::PathSeparator && !path_separators => {}
                Pattern::Anywhere(class) => {
                    alternatives.push(format!("([{}])", class));
                    rules.push(entry.rule);
                }
                Pattern::Boundary(class) => {
                    alternatives.push(format!(r"\A([{}])", class));
                    rules.push(entry.rule);
                    alternatives.push(format!(r"([{}])\z", class));
                    rules.push(entry.rule);
                }
                Pattern::Anchored(_) => {}
            }
        }

        Scanner {
            regex: Regex::new(&alternatives.join("|")).unwrap(),
            set: RegexSet::new(&alternatives).unwrap(),
            rules,
        }
    }

    /// Rule for a name made of the single code point `text`.
    pub(crate) fn classify(&self, text: &str) -> Option<Rule> {
        self.set.matches(text).into_iter().next().map(|i| self.rules[i])
    }

    /// Rule of the first capture group that participated in `caps`.
    pub(crate) fn rule_of<'h>(&self, caps: &regex::Captures<'h>) -> Option<(regex::Match<'h>, Rule)> {
        caps.iter()
            .skip(1)
            .zip(self.rules.iter())
            .find_map(|(group, rule)| group.map(|m| (m, *rule)))
    }
}

fn device_name_regex(table: &[Entry]) -> Regex {
    let names: Vec<&str> = table
        .iter()
        .filter_map(|entry| match entry.pattern {
            Pattern::Anchored(names) => Some(names),
            _ => None,
        })
        .collect();
    Regex::new(&format!(r"(?i)\A({})(?:\.|\z)", names.join("|"))).unwrap()
}

lazy_static! {
    pub(crate) static ref SCANNER: Scanner = Scanner::new(RULE_TABLE, false);
    pub(crate) static ref SCANNER_WITH_SEPARATORS: Scanner = Scanner::new(RULE_TABLE, true);
    pub(crate) static ref DEVICE_NAME: Regex = device_name_regex(RULE_TABLE);
}
