//! Multiple sequence alignment with MAFFT.

use std::{
    io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    time::Instant,
};
use crate::{
    Error,
    ext::{fmt as fmt_ext, sys as sys_ext},
};

pub struct Mafft {
    pub exe: PathBuf,
    pub threads: u16,
}

impl Mafft {
    /// `mafft --thread <threads> <input>`, stdout is not redirected yet.
    pub fn command(&self, input: &Path) -> Command {
        let mut cmd = Command::new(&self.exe);
        cmd.arg("--thread").arg(self.threads.to_string()).arg(input);
        cmd
    }

    /// Aligns `input` multifasta file and writes MAFFT stdout into `output` without changes.
    /// On failure, `output` may stay truncated.
    pub fn align(&self, input: &Path, output: &Path) -> Result<(), Error> {
        if !input.is_file() {
            return Err(Error::Io(io::Error::new(io::ErrorKind::NotFound, "input multifasta file is missing"),
                vec![input.to_owned()]));
        }
        let out_file = sys_ext::create_file(output)?;
        let mut cmd = self.command(input);
        cmd.stdout(Stdio::from(out_file));
        log::debug!("    {} > {}", fmt_ext::command(&cmd), fmt_ext::path(output));

        let start = Instant::now();
        let res = sys_ext::run_command(&mut cmd)?;
        log::debug!("    Finished in {}", fmt_ext::Duration(start.elapsed()));
        if !res.status.success() {
            return Err(Error::subprocess(&cmd, &res));
        }
        Ok(())
    }
}
