use std::error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum SafenameError {
    Io(io::Error),
    Config(toml::de::Error),
    Json(serde_json::Error),
    InvalidReplacement(char),
}

impl fmt::Display for SafenameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SafenameError::Io(ref err) => write!(f, "IO error: {}", err),
            SafenameError::Config(ref err) => write!(f, "config error: {}", err),
            SafenameError::Json(ref err) => write!(f, "JSON error: {}", err),
            SafenameError::InvalidReplacement(c) => {
                write!(f, "replacement character U+{:04X} is not allowed in a filename", c as u32)
            }
        }
    }
}

impl error::Error for SafenameError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            SafenameError::Io(ref err) => Some(err),
            SafenameError::Config(ref err) => Some(err),
            SafenameError::Json(ref err) => Some(err),
            SafenameError::InvalidReplacement(_) => None,
        }
    }
}

impl From<io::Error> for SafenameError {
    fn from(err: io::Error) -> Self {
        SafenameError::Io(err)
    }
}

impl From<toml::de::Error> for SafenameError {
    fn from(err: toml::de::Error) -> Self {
        SafenameError::Config(err)
    }
}

impl From<serde_json::Error> for SafenameError {
    fn from(err: serde_json::Error) -> Self {
        SafenameError::Json(err)
    }
}

#[test]
fn error_display_invalid_replacement() {
    let err = SafenameError::InvalidReplacement(':');
    assert_eq!(err.to_string(), "replacement character U+003A is not allowed in a filename");
}

#[test]
fn error_source_io() {
    use std::error::Error;

    let err = SafenameError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
    assert!(err.source().is_some());
    assert!(err.to_string().starts_with("IO error:"));
}
