use std::{
    io,
    fmt::Write,
    path::PathBuf,
    process::{Command, Output},
};
use colored::Colorize;
use crate::ext;

/// General enum, representing possible errors.
#[derive(Debug)]
pub enum Error {
    Io(io::Error, Vec<PathBuf>),
    /// Error, produced by an argument parser.
    Lexopt(lexopt::Error),
    /// Executable not found.
    NoExec(PathBuf),
    /// Subcommand failed.
    Subprocess(String),
    InvalidInput(String),
    RuntimeError(String),
}

impl From<lexopt::Error> for Error {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}

/// Number of trailing stderr lines, kept in the subprocess error message.
const STDERR_TAIL: usize = 20;

impl Error {
    /// Describes failed subprocess: command, exit status and the last lines of its stderr.
    pub fn subprocess(cmd: &Command, output: &Output) -> Self {
        let mut s = String::new();
        write!(s, "    {}\n    exited with {}", ext::fmt::command(cmd), output.status).unwrap();
        let stderr = String::from_utf8_lossy(&output.stderr);
        let lines: Vec<&str> = stderr.lines().filter(|line| !line.trim().is_empty()).collect();
        if !lines.is_empty() {
            write!(s, ", stderr:").unwrap();
            for line in &lines[lines.len().saturating_sub(STDERR_TAIL)..] {
                write!(s, "\n        {}", line).unwrap();
            }
        }
        Self::Subprocess(s)
    }

    /// Format error message.
    pub fn display(&self) -> String {
        let mut s = String::new();
        match self {
            Self::Io(e, files) => {
                write!(s, "{} in relation to ", "Input/Output error".red()).unwrap();
                if files.is_empty() {
                    write!(s, "unnamed streams").unwrap();
                } else {
                    write!(s, "{}", files.iter().map(|f| ext::fmt::path(f).cyan().to_string())
                        .collect::<Vec<_>>().join(", ")).unwrap();
                }
                write!(s, ": {}", e.kind()).unwrap();
                if let Some(e2) = e.get_ref() {
                    write!(s, ", {}", e2).unwrap();
                }
            }
            Self::Lexopt(e) => write!(s, "{} to parse command-line arguments: {}", "Failed".red(), e).unwrap(),
            Self::NoExec(path) => write!(s, "{} at {}", "Could not find executable".red(),
                ext::fmt::path(path).cyan()).unwrap(),
            Self::Subprocess(e) => write!(s, "{}:\n{}", "Subprocess error".red(), e).unwrap(),
            Self::InvalidInput(e) => write!(s, "{}: {}", "Invalid input".red(), e).unwrap(),
            Self::RuntimeError(e) => write!(s, "{}: {}", "Runtime error".red(), e).unwrap(),
        };
        s
    }
}

macro_rules! validate_param {
    ($cond:expr, $($arg:expr),+) => {{
        if !($cond) {
            (
                Err($crate::Error::InvalidInput(format!($($arg),+)))
            ?)
        }
    }};
}
pub(crate) use validate_param;

macro_rules! add_path {
    (!) => {
        |e| $crate::Error::Io(e, Vec::new())
    };
    ($path:expr) => {
        |e| $crate::Error::Io(e, vec![std::convert::AsRef::<std::path::Path>::as_ref(&$path).to_owned()])
    };
    ($($path:expr),+) => {
        |e| {
            let mut v = Vec::new();
            $(
                v.push(std::convert::AsRef::<std::path::Path>::as_ref(&$path).to_owned());
            )*
            $crate::Error::Io(e, v)
        }
    };
}
pub(crate) use add_path;

macro_rules! error {
    ($var:ident, $($arg:expr),+ $(,)?) => {
        $crate::Error::$var(format!($($arg),+))
    }
}
pub(crate) use error;

/// Wrapper around the standard result.
pub type Result<T> = std::result::Result<T, Error>;
