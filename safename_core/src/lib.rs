
extern crate regex;

extern crate serde;
extern crate serde_json;
extern crate toml;

#[macro_use]
extern crate prettytable;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate log;

pub mod error;
pub use error::SafenameError;

pub mod rule;
pub use rule::Rule;

pub mod sanitizer;
pub use sanitizer::{check, is_valid, sanitize, Sanitizer, Violation};

pub mod ranges;
pub use ranges::{disallowed_ranges, CodePointRange, Placement};

pub mod config;
pub mod file;
pub mod report;
