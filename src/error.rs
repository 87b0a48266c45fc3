use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    Length(usize),
    Digit(char),
}

impl Error for ModeError {}
impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModeError::Length(n) => write!(f, "must be 3 octal digits, got {} characters", n),
            ModeError::Digit(c) => {
                write!(f, "must be 3 octal digits, '{}' is not an octal digit", c)
            }
        }
    }
}

/// Rejected invocation. Raised before any traversal starts.
#[derive(Debug)]
pub enum CliError {
    Getopts(getopts::Fail),
    Unexpected(String),
    MissingMode,
    Mode(ModeError),
    MissingPath,
    NoSuchPath(PathBuf),
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CliError::Getopts(e) => Some(e),
            CliError::Mode(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::Getopts(e) => write!(f, "{}", e),
            CliError::Unexpected(arg) => write!(f, "unexpected argument \"{}\"", arg),
            CliError::MissingMode => write!(f, "--mode option required"),
            CliError::Mode(e) => write!(f, "invalid --mode: {}", e),
            CliError::MissingPath => write!(f, "--path option required"),
            CliError::NoSuchPath(p) => {
                write!(f, "file / directory \"{}\" does not exist", p.display())
            }
        }
    }
}

impl From<getopts::Fail> for CliError {
    fn from(e: getopts::Fail) -> CliError {
        CliError::Getopts(e)
    }
}

impl From<ModeError> for CliError {
    fn from(e: ModeError) -> CliError {
        CliError::Mode(e)
    }
}

/// Failure that ended enforcement of one root path.
#[derive(Debug)]
pub enum EnforceError {
    Walk {
        root: PathBuf,
        source: io::Error,
    },
    Apply {
        root: PathBuf,
        path: PathBuf,
        source: io::Error,
    },
}

impl EnforceError {
    pub fn root(&self) -> &PathBuf {
        match self {
            EnforceError::Walk { root, .. } => root,
            EnforceError::Apply { root, .. } => root,
        }
    }
}

impl Error for EnforceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EnforceError::Walk { source, .. } => Some(source),
            EnforceError::Apply { source, .. } => Some(source),
        }
    }
}

impl fmt::Display for EnforceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EnforceError::Walk { root, source } => write!(
                f,
                "error ensuring permissions for \"{}\": {}",
                root.display(),
                source
            ),
            EnforceError::Apply { root, path, source } => write!(
                f,
                "error ensuring permissions for \"{}\": error running chmod on \"{}\": {}",
                root.display(),
                path.display(),
                source
            ),
        }
    }
}
