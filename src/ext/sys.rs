use std::{
    io::{self, Read, BufRead},
    fs::{self, File},
    path::{Path, PathBuf},
    ffi::OsStr,
    process::{Child, Command, Output, Stdio},
};
use crate::{Error, err::add_path};

/// Finds an executable, and returns Error, if executable is not available.
pub fn find_exe(p: impl AsRef<Path>) -> Result<PathBuf, Error> {
    which::which(p.as_ref()).map_err(|_| Error::NoExec(p.as_ref().to_owned()))
}

/// Creates a file, replacing the old one, if it exists.
pub fn create_file(filename: &Path) -> Result<File, Error> {
    File::create(filename).map_err(add_path!(filename))
}

/// Create directory together with all its parents, if it does not exist yet.
pub fn mkdir(path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path).map_err(add_path!(path))
    } else {
        Ok(())
    }
}

/// Returns a path with a new suffix appended to the end.
pub fn append_path(path: &Path, suffix: impl AsRef<OsStr>) -> PathBuf {
    let mut os_string = path.as_os_str().to_owned();
    os_string.push(suffix.as_ref());
    os_string.into()
}

/// Creates an empty file, which marks successful completion.
pub fn write_success_file(filename: impl AsRef<Path>) -> Result<(), Error> {
    let filename = filename.as_ref();
    File::create(filename).map(|_| ()).map_err(add_path!(filename))
}

/// Removes a marker file, if it exists.
pub fn remove_marker(filename: impl AsRef<Path>) -> Result<(), Error> {
    let filename = filename.as_ref();
    match fs::remove_file(filename) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(Error::Io(e, vec![filename.to_owned()])),
        _ => Ok(()),
    }
}

/// Returns true if the file exists and is not empty.
pub fn non_empty_file(filename: &Path) -> bool {
    fs::metadata(filename).map(|meta| meta.is_file() && meta.len() > 0).unwrap_or(false)
}

/// Finds the first line that satisfies the predicate and applies `f` to it.
pub fn find_line<R, T, F>(stream: R, mut f: F) -> io::Result<Option<T>>
where R: BufRead,
      F: FnMut(&str) -> Option<T>,
{
    for line in stream.lines() {
        if let Some(val) = f(&line?) {
            return Ok(Some(val));
        }
    }
    Ok(None)
}

/// RAII child wrapper, that kills the child if it gets dropped.
pub struct ChildGuard {
    child: Child,
    armed: bool,
}

impl ChildGuard {
    pub fn new(child: Child) -> Self {
        Self {
            child,
            armed: true,
        }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if self.armed {
            match self.child.kill() {
                Err(e) => {
                    // InvalidInput means that the process exited already.
                    if e.kind() != io::ErrorKind::InvalidInput {
                        log::error!("Could not kill child process: {}", e);
                    }
                }
                Ok(_) => log::error!("Successfully killed child process"),
            }
        }
    }
}

/// Spawns the command and waits for it to finish.
/// Stderr is always captured, stdout is left as configured by the caller and is never captured.
pub fn run_command(cmd: &mut Command) -> Result<Output, Error> {
    let spawned = cmd.stderr(Stdio::piped()).spawn();
    let child = spawned.map_err(add_path!(cmd.get_program()))?;
    let mut guard = ChildGuard::new(child);
    let mut stderr = Vec::new();
    if let Some(mut pipe) = guard.child.stderr.take() {
        pipe.read_to_end(&mut stderr).map_err(add_path!(!))?;
    }
    let status = guard.child.wait().map_err(add_path!(!))?;
    guard.disarm();
    Ok(Output {
        status,
        stdout: Vec::new(),
        stderr,
    })
}
