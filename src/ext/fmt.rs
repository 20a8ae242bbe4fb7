use std::{
    fmt::{self, Display},
    path::{Path, PathBuf},
    process::Command,
    ffi::OsStr,
};

/// Puts single quotes around the string if it contains whitespace or shell-special characters.
fn quote(s: &str) -> String {
    const SPECIAL: &'static [char] = &['\'', '"', '$', '`', '\\', '|', '&', ';', '<', '>', '(', ')', '*', '?'];
    if s.is_empty() {
        "''".to_string()
    } else if s.contains(char::is_whitespace) || s.contains(SPECIAL) {
        format!("'{}'", s.replace('\'', r"'\''"))
    } else {
        s.to_string()
    }
}

/// Pretty path formatting: replace $HOME with ~, put quotes around if needed.
pub fn path(path: &Path) -> String {
    lazy_static::lazy_static!{
        static ref HOME: Option<PathBuf> = std::env::var_os("HOME").map(PathBuf::from);
    }
    if let Some(home) = (*HOME).as_ref() {
        if let Ok(suffix) = path.strip_prefix(home) {
            return quote(&Path::new("~").join(suffix).to_string_lossy());
        }
    }
    quote(&path.to_string_lossy())
}

/// Converts command into a string that can be pasted into a shell, replacing HOME with ~.
pub fn command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(OsStr::as_ref)
        .map(path)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats duration as `HH:MM:SS.SSS`.
pub struct Duration(pub std::time::Duration);

impl Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const IN_HOUR: u64 = 3600;
        const IN_MINUTE: u64 = 60;
        let seconds = self.0.as_secs();
        write!(f, "{}:{:02}:{:02}.{:03}", seconds / IN_HOUR, seconds % IN_HOUR / IN_MINUTE, seconds % IN_MINUTE,
            self.0.subsec_millis())
    }
}

/// Count together with a noun in the correct number: `1 sample`, `3 samples`.
pub struct Plural<'a>(pub usize, pub &'a str);

impl<'a> Display for Plural<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}{}", self.0, self.1, if self.0 == 1 { "" } else { "s" })
    }
}
