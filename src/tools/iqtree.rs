//! Substitution model selection and tree construction with IQ-TREE 2.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    process::{Command, Stdio},
    time::Instant,
};
use regex::Regex;
use crate::{
    Error,
    err::add_path,
    ext::{fmt as fmt_ext, sys as sys_ext},
    command::paths,
};
use super::Model;

lazy_static::lazy_static! {
    static ref BEST_FIT: Regex = Regex::new(r"Best-fit model:\s*(\S+)").unwrap();
}

/// Finds the first `Best-fit model: <MODEL> ...` line and returns `<MODEL>`.
pub fn parse_best_fit_model<R: BufRead>(stream: R) -> io::Result<Option<Model>> {
    sys_ext::find_line(stream, |line| BEST_FIT.captures(line).and_then(|caps| Model::new(&caps[1])))
}

pub struct IqTree {
    pub exe: PathBuf,
    pub threads: u16,
    /// Outgroup sequence, used to root the trees.
    pub outgroup: String,
    pub seed: u64,
    /// Model selection files are written to `model_dir/model_selection.*`.
    pub model_dir: PathBuf,
}

impl IqTree {
    pub fn model_prefix(&self) -> PathBuf {
        self.model_dir.join(paths::MODEL_PREFIX)
    }

    pub fn model_selection_command(&self, alignment: &Path) -> Command {
        let mut cmd = Command::new(&self.exe);
        cmd.arg("-s").arg(alignment)
            .args(&[
                "-m", "TESTONLY", // Only select the model, do not build the tree.
                "-nt", &self.threads.to_string(),
            ])
            .arg("-pre").arg(self.model_prefix());
        cmd
    }

    /// Runs model selection and returns the best-fit model.
    /// Returns None if IQ-TREE failed, or the log file does not contain the model.
    pub fn select_model(&self, alignment: &Path) -> Result<Option<Model>, Error> {
        sys_ext::mkdir(&self.model_dir)?;
        let mut cmd = self.model_selection_command(alignment);
        cmd.stdout(Stdio::null());
        log::debug!("    {}", fmt_ext::command(&cmd));
        let start = Instant::now();
        let res = sys_ext::run_command(&mut cmd)?;
        log::debug!("    Finished in {}", fmt_ext::Duration(start.elapsed()));
        if !res.status.success() {
            log::error!("Model selection failed. {}", Error::subprocess(&cmd, &res).display());
            return Ok(None);
        }

        let log_filename = sys_ext::append_path(&self.model_prefix(), ".log");
        let log_file = match File::open(&log_filename) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::error!("IQ-TREE log {} is not found", fmt_ext::path(&log_filename));
                return Ok(None);
            }
            Err(e) => return Err(Error::Io(e, vec![log_filename])),
        };
        let model = parse_best_fit_model(BufReader::new(log_file)).map_err(add_path!(log_filename))?;
        if model.is_none() {
            log::error!("IQ-TREE log {} does not contain the best-fit model", fmt_ext::path(&log_filename));
        }
        Ok(model)
    }

    pub fn tree_command(&self, alignment: &Path, model: &Model, prefix: &Path) -> Command {
        let mut cmd = Command::new(&self.exe);
        cmd.arg("-s").arg(alignment)
            .args(&[
                "-o", &self.outgroup, // Root the tree at the outgroup,
                "-m", model.as_str(), // Substitution model,
                "-nt", &self.threads.to_string(),
                "-redo", // Overwrite results of the previous runs,
                "-fast", // Fast tree search,
                "-asr",  // Ancestral state reconstruction.
            ])
            .arg("-pre").arg(prefix)
            .args(&["-seed", &self.seed.to_string()]);
        cmd
    }

    /// Builds a tree, all output files are written to `prefix.*`.
    pub fn build_tree(&self, alignment: &Path, model: &Model, prefix: &Path) -> Result<(), Error> {
        let mut cmd = self.tree_command(alignment, model, prefix);
        cmd.stdout(Stdio::null());
        log::debug!("    {}", fmt_ext::command(&cmd));
        let start = Instant::now();
        let res = sys_ext::run_command(&mut cmd)?;
        log::debug!("    Finished in {}", fmt_ext::Duration(start.elapsed()));
        if !res.status.success() {
            return Err(Error::subprocess(&cmd, &res));
        }
        Ok(())
    }
}
