use prettytable::{Cell, Row, Table};

use crate::error::SafenameError;
use crate::ranges::CodePointRange;
use crate::sanitizer::{Sanitizer, Violation};

/// Render `name` with every code point `sanitizer` would replace written as `\u{XXXX}`.
pub fn escape_name(sanitizer: &Sanitizer, name: &str) -> String {
    let violations = sanitizer.check(name);
    let mut escaped = String::with_capacity(name.len());

    for (index, c) in name.chars().enumerate() {
        let flagged = violations.iter().any(|v| v.index == index);
        if flagged && (c.is_control() || !c.is_ascii()) {
            escaped.push_str(&format!("\\u{{{:04X}}}", c as u32));
        } else {
            escaped.push(c);
        }
    }

    escaped
}

pub fn violations_table(violations: &[Violation]) -> Table {
    let mut table: Table = Table::new();

    table.set_titles(row!["index", "code point", "rule"]);

    for violation in violations {
        let mut row = Row::empty();
        row.add_cell(Cell::new(&violation.index.to_string()));
        row.add_cell(Cell::new(&format!("U+{:04X}", violation.code_point as u32)));
        row.add_cell(Cell::new(violation.rule.name()));
        table.add_row(row);
    }

    table
}

pub fn print_violations_pretty(violations: &[Violation]) {
    println!("{}", violations_table(violations));
}

pub fn ranges_table(ranges: &[CodePointRange]) -> Table {
    let mut table: Table = Table::new();

    table.set_titles(row!["range", "count", "placement", "rule"]);

    for range in ranges {
        table.add_row(row![
            range.to_string(),
            range.len(),
            range.placement.name(),
            range.rule.name()
        ]);
    }

    table
}

pub fn print_ranges_pretty(ranges: &[CodePointRange]) {
    println!("{}", ranges_table(ranges));
}

pub fn violations_to_json(violations: &[Violation]) -> Result<String, SafenameError> {
    Ok(serde_json::to_string_pretty(violations)?)
}

pub fn ranges_to_json(ranges: &[CodePointRange]) -> Result<String, SafenameError> {
    Ok(serde_json::to_string_pretty(ranges)?)
}
