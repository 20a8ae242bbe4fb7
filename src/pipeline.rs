//! Alignment, model selection and tree construction across all samples.

use std::{
    fmt,
    str::FromStr,
    time::Instant,
};
use crate::{
    Error,
    err::{error, validate_param},
    ext::{fmt as fmt_ext, sys as sys_ext},
    samples::Sample,
    tools::{Model, Tools},
};

/// What to do when a step fails for a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailPolicy {
    /// Stop the whole run.
    Abort,
    /// Log the error and continue with the next sample.
    Skip,
    /// Repeat the step at most N more times, then stop the run.
    Retry(u32),
}

impl FromStr for FailPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase() as &str {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            "retry" => Ok(Self::Retry(1)),
            low => low.strip_prefix("retry:")
                .and_then(|n| n.parse().ok())
                .map(Self::Retry)
                .ok_or_else(|| format!("Unknown failure policy {:?} (possible values: abort, skip, retry, retry:N)", s)),
        }
    }
}

impl fmt::Display for FailPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Abort => f.write_str("abort"),
            Self::Skip => f.write_str("skip"),
            Self::Retry(n) => write!(f, "retry:{}", n),
        }
    }
}

/// Which existing results are reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rerun {
    /// Rerun everything.
    All,
    /// Reuse completed alignments.
    Part,
    /// Reuse completed alignments and skip completed samples.
    None,
}

impl Rerun {
    pub fn to_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Part => "part",
            Self::None => "none",
        }
    }
}

impl FromStr for Rerun {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase() as &str {
            "all" => Ok(Self::All),
            "part" => Ok(Self::Part),
            "none" => Ok(Self::None),
            _ => Err(format!("Unknown rerun mode {:?} (possible values: all, part, none)", s)),
        }
    }
}

impl fmt::Display for Rerun {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

pub struct Config {
    pub rerun: Rerun,
    /// Use this model instead of selecting one.
    pub model: Option<Model>,
    /// Sample, on which the model is selected. Default: first sample.
    pub model_sample: Option<String>,
    pub on_align_fail: FailPolicy,
    pub on_model_fail: FailPolicy,
    pub on_tree_fail: FailPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rerun: Rerun::All,
            model: None,
            model_sample: None,
            on_align_fail: FailPolicy::Abort,
            on_model_fail: FailPolicy::Abort,
            on_tree_fail: FailPolicy::Skip,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        validate_param!(self.on_model_fail != FailPolicy::Skip,
            "Model selection cannot be skipped (possible policies: abort, retry:N)");
        if self.model.is_some() && self.model_sample.is_some() {
            log::warn!("Substitution model is provided, model-source sample is ignored");
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub succeeded: usize,
    /// Samples, completed in a previous run.
    pub skipped: usize,
    pub failed: usize,
}

/// Runs `f` according to the failure policy.
/// Returns None if the step failed and the sample should be skipped.
fn with_policy<T>(
    policy: FailPolicy,
    step: &str,
    sample: &Sample,
    mut f: impl FnMut() -> Result<T, Error>,
) -> Result<Option<T>, Error>
{
    let mut attempt = 1;
    loop {
        let e = match f() {
            Ok(val) => return Ok(Some(val)),
            Err(e) => e,
        };
        match policy {
            FailPolicy::Retry(n) if attempt <= n => {
                log::warn!("    [{}] {} failed (attempt {}/{}), retrying:\n        {}",
                    sample, step, attempt, n + 1, e.display());
                attempt += 1;
            }
            FailPolicy::Skip => {
                log::error!("    [{}] {} failed, skipping the sample:\n        {}", sample, step, e.display());
                return Ok(None);
            }
            _ => {
                log::error!("    [{}] {} failed", sample, step);
                return Err(e);
            }
        }
    }
}

pub struct Pipeline<T> {
    tools: T,
    config: Config,
}

impl<T: Tools> Pipeline<T> {
    pub fn new(tools: T, config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { tools, config })
    }

    #[cfg(test)]
    pub fn tools(&self) -> &T {
        &self.tools
    }

    /// Index of the sample, used for model selection.
    fn model_source(&self, samples: &[Sample]) -> Result<usize, Error> {
        match self.config.model_sample.as_ref() {
            None => Ok(0),
            Some(name) => samples.iter().position(|sample| sample.name() == name)
                .ok_or_else(|| error!(InvalidInput, "Model-source sample {} is not found among {}",
                    name, fmt_ext::Plural(samples.len(), "sample"))),
        }
    }

    /// Aligns the sample. Returns false if the alignment failed and the sample should be skipped.
    /// Existing alignment is reused only if it was marked as completed.
    fn align(&mut self, sample: &Sample) -> Result<bool, Error> {
        let aligned_file = sample.aligned_file();
        if self.config.rerun != Rerun::All && aligned_file.exists() && sys_ext::non_empty_file(sample.alignment()) {
            log::info!("    [{}] Alignment {} exists, skipping MAFFT", sample, fmt_ext::path(sample.alignment()));
            return Ok(true);
        }
        // Tree of the sample is outdated as soon as the alignment changes.
        sys_ext::remove_marker(&aligned_file)?;
        sys_ext::remove_marker(sample.success_file())?;

        log::info!("    [{}] Aligning sequences", sample);
        let policy = self.config.on_align_fail;
        let tools = &mut self.tools;
        if with_policy(policy, "Alignment", sample, || tools.align(sample.input(), sample.alignment()))?.is_some() {
            sys_ext::write_success_file(&aligned_file)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Aligns the model-source sample and selects the model on its alignment.
    fn select_model(&mut self, sample: &Sample) -> Result<Model, Error> {
        if !self.align(sample)? {
            return Err(error!(RuntimeError, "Alignment of {} failed, cannot select substitution model", sample));
        }
        log::info!("    [{}] Selecting substitution model", sample);
        let policy = self.config.on_model_fail;
        let tools = &mut self.tools;
        let model = with_policy(policy, "Model selection", sample, || tools.select_model(sample.alignment())?
            .ok_or_else(|| error!(RuntimeError, "Could not establish substitution model from {}", sample)))?;
        model.ok_or_else(|| error!(RuntimeError, "Could not establish substitution model from {}", sample))
    }

    /// Builds the tree and marks the sample as completed. Returns false if the sample was skipped.
    fn build_tree(&mut self, sample: &Sample, model: &Model) -> Result<bool, Error> {
        log::info!("    [{}] Building tree ({})", sample, model);
        let policy = self.config.on_tree_fail;
        let tools = &mut self.tools;
        let built = with_policy(policy, "Tree construction", sample,
            || tools.build_tree(sample.alignment(), model, sample.tree_prefix()))?.is_some();
        if built {
            sys_ext::write_success_file(sample.success_file())?;
        }
        Ok(built)
    }

    /// Processes all samples in the given order.
    /// The model is established before the first tree is built, and the same model is used for all samples.
    pub fn run(&mut self, samples: &[Sample]) -> crate::Result<Summary> {
        validate_param!(!samples.is_empty(), "No samples to analyze");
        let mut summary = Summary {
            total: samples.len(),
            ..Summary::default()
        };

        let (model, aligned) = match self.config.model.clone() {
            Some(model) => {
                log::info!("Using substitution model {}", model);
                (model, None)
            }
            None => {
                let i = self.model_source(samples)?;
                if self.config.rerun != Rerun::None {
                    sys_ext::remove_marker(samples[i].success_file())?;
                }
                log::info!("Selecting substitution model on {}", samples[i]);
                let model = self.select_model(&samples[i])?;
                log::info!("Best-fit model from {}: {}", samples[i], model);
                (model, Some(i))
            }
        };

        for (i, sample) in samples.iter().enumerate() {
            if self.config.rerun == Rerun::None && sample.success_file().exists() {
                log::info!("Skipping {}: already completed", sample);
                summary.skipped += 1;
                continue;
            }
            sys_ext::remove_marker(sample.success_file())?;

            log::info!("Analyzing {}", sample);
            let timer = Instant::now();
            if aligned != Some(i) && !self.align(sample)? {
                summary.failed += 1;
                continue;
            }
            if self.build_tree(sample, &model)? {
                log::info!("    [{}] Successfully finished in {}", sample, fmt_ext::Duration(timer.elapsed()));
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        fs,
        collections::{HashMap, VecDeque},
        path::{Path, PathBuf},
    };
    use crate::samples::samples_from_names;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Call {
        Align(PathBuf),
        Select(PathBuf),
        Tree(PathBuf, String),
    }

    /// Records all calls. Steps fail the given number of times for the given path.
    /// Alignment always writes a short output, even if it fails afterwards.
    #[derive(Default)]
    struct MockTools {
        calls: Vec<Call>,
        models: VecDeque<Option<&'static str>>,
        align_failures: HashMap<PathBuf, u32>,
        tree_failures: HashMap<PathBuf, u32>,
    }

    impl MockTools {
        fn with_model(model: &'static str) -> Self {
            Self {
                models: VecDeque::from(vec![Some(model)]),
                ..Self::default()
            }
        }

        fn fail(failures: &mut HashMap<PathBuf, u32>, path: &Path) -> Result<(), Error> {
            match failures.get_mut(path) {
                Some(n) if *n > 0 => {
                    *n -= 1;
                    Err(Error::Subprocess(format!("mock failure for {}", path.display())))
                }
                _ => Ok(()),
            }
        }
    }

    impl Tools for MockTools {
        fn align(&mut self, input: &Path, output: &Path) -> Result<(), Error> {
            self.calls.push(Call::Align(input.to_owned()));
            fs::write(output, b">a\nAC\n").map_err(|e| Error::Io(e, vec![output.to_owned()]))?;
            Self::fail(&mut self.align_failures, input)
        }

        fn select_model(&mut self, alignment: &Path) -> Result<Option<Model>, Error> {
            self.calls.push(Call::Select(alignment.to_owned()));
            Ok(self.models.pop_front().flatten().and_then(Model::new))
        }

        fn build_tree(&mut self, alignment: &Path, model: &Model, prefix: &Path) -> Result<(), Error> {
            self.calls.push(Call::Tree(alignment.to_owned(), model.to_string()));
            Self::fail(&mut self.tree_failures, prefix)
        }
    }

    fn create_samples(root: &Path, n: u32) -> Vec<Sample> {
        let names: Vec<String> = (1..=n).map(|i| format!("Sample_{}", i)).collect();
        for name in names.iter() {
            fs::create_dir(root.join(name)).unwrap();
        }
        samples_from_names(root, names, 5250).unwrap()
    }

    fn align(s: &Sample) -> Call {
        Call::Align(s.input().to_owned())
    }

    fn select(s: &Sample) -> Call {
        Call::Select(s.alignment().to_owned())
    }

    fn tree(s: &Sample, model: &str) -> Call {
        Call::Tree(s.alignment().to_owned(), model.to_owned())
    }

    #[test]
    fn model_from_first_sample() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 3);
        let mut pipeline = Pipeline::new(MockTools::with_model("GTR+F+I"), Config::default()).unwrap();
        let summary = pipeline.run(&s).unwrap();
        assert_eq!(summary, Summary { total: 3, succeeded: 3, skipped: 0, failed: 0 });
        assert_eq!(pipeline.tools().calls, vec![
            align(&s[0]), select(&s[0]), tree(&s[0], "GTR+F+I"),
            align(&s[1]), tree(&s[1], "GTR+F+I"),
            align(&s[2]), tree(&s[2], "GTR+F+I"),
        ]);
        assert!(s.iter().all(|sample| sample.success_file().exists()));
    }

    #[test]
    fn unknown_model_fails_before_trees() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 3);
        let mut pipeline = Pipeline::new(MockTools::default(), Config::default()).unwrap();
        assert!(matches!(pipeline.run(&s), Err(Error::RuntimeError(_))));
        assert_eq!(pipeline.tools().calls, vec![align(&s[0]), select(&s[0])]);
    }

    #[test]
    fn model_selection_retry() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 2);
        let tools = MockTools {
            models: VecDeque::from(vec![None, Some("HKY+F")]),
            ..MockTools::default()
        };
        let config = Config { on_model_fail: FailPolicy::Retry(2), ..Config::default() };
        let mut pipeline = Pipeline::new(tools, config).unwrap();
        assert_eq!(pipeline.run(&s).unwrap().succeeded, 2);
        assert_eq!(pipeline.tools().calls, vec![
            align(&s[0]), select(&s[0]), select(&s[0]), tree(&s[0], "HKY+F"),
            align(&s[1]), tree(&s[1], "HKY+F"),
        ]);
    }

    #[test]
    fn skipping_model_selection_is_invalid() {
        let config = Config { on_model_fail: FailPolicy::Skip, ..Config::default() };
        assert!(matches!(Pipeline::new(MockTools::default(), config), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn tree_failure_skips_sample() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 3);
        let mut tools = MockTools::with_model("GTR+F+I");
        tools.tree_failures.insert(s[1].tree_prefix().to_owned(), u32::MAX);
        let mut pipeline = Pipeline::new(tools, Config::default()).unwrap();
        let summary = pipeline.run(&s).unwrap();
        assert_eq!(summary, Summary { total: 3, succeeded: 2, skipped: 0, failed: 1 });
        assert_eq!(pipeline.tools().calls.last(), Some(&tree(&s[2], "GTR+F+I")));
        assert!(!s[1].success_file().exists());
        assert!(s[2].success_file().exists());
    }

    #[test]
    fn tree_failure_aborts() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 3);
        let mut tools = MockTools::with_model("GTR+F+I");
        tools.tree_failures.insert(s[1].tree_prefix().to_owned(), 1);
        let config = Config { on_tree_fail: FailPolicy::Abort, ..Config::default() };
        let mut pipeline = Pipeline::new(tools, config).unwrap();
        assert!(matches!(pipeline.run(&s), Err(Error::Subprocess(_))));
        assert!(!pipeline.tools().calls.contains(&align(&s[2])));
    }

    #[test]
    fn tree_failure_retried() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 2);
        let mut tools = MockTools::with_model("GTR+F+I");
        tools.tree_failures.insert(s[1].tree_prefix().to_owned(), 2);
        let config = Config { on_tree_fail: FailPolicy::Retry(2), ..Config::default() };
        let mut pipeline = Pipeline::new(tools, config).unwrap();
        assert_eq!(pipeline.run(&s).unwrap().succeeded, 2);
        let n_trees = pipeline.tools().calls.iter().filter(|&call| *call == tree(&s[1], "GTR+F+I")).count();
        assert_eq!(n_trees, 3);
    }

    #[test]
    fn alignment_failure() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 3);
        let mut tools = MockTools::with_model("GTR+F+I");
        tools.align_failures.insert(s[1].input().to_owned(), 1);
        let mut pipeline = Pipeline::new(tools, Config::default()).unwrap();
        assert!(matches!(pipeline.run(&s), Err(Error::Subprocess(_))));
        assert_eq!(pipeline.tools().calls.last(), Some(&align(&s[1])));

        let mut tools = MockTools::with_model("GTR+F+I");
        tools.align_failures.insert(s[1].input().to_owned(), 1);
        let config = Config { on_align_fail: FailPolicy::Skip, ..Config::default() };
        let mut pipeline = Pipeline::new(tools, config).unwrap();
        let summary = pipeline.run(&s).unwrap();
        assert_eq!(summary.failed, 1);
        assert!(!pipeline.tools().calls.contains(&tree(&s[1], "GTR+F+I")));
    }

    #[test]
    fn failed_model_sample_alignment() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 2);
        let mut tools = MockTools::with_model("GTR+F+I");
        tools.align_failures.insert(s[0].input().to_owned(), 1);
        let config = Config { on_align_fail: FailPolicy::Skip, ..Config::default() };
        let mut pipeline = Pipeline::new(tools, config).unwrap();
        assert!(matches!(pipeline.run(&s), Err(Error::RuntimeError(_))));
        assert_eq!(pipeline.tools().calls, vec![align(&s[0])]);
    }

    #[test]
    fn explicit_model_sample() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 3);
        let config = Config { model_sample: Some("Sample_2".to_owned()), ..Config::default() };
        let mut pipeline = Pipeline::new(MockTools::with_model("K2P"), config).unwrap();
        pipeline.run(&s).unwrap();
        assert_eq!(pipeline.tools().calls, vec![
            align(&s[1]), select(&s[1]),
            align(&s[0]), tree(&s[0], "K2P"),
            tree(&s[1], "K2P"),
            align(&s[2]), tree(&s[2], "K2P"),
        ]);
    }

    #[test]
    fn missing_model_sample() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 2);
        let config = Config { model_sample: Some("Sample_9".to_owned()), ..Config::default() };
        let mut pipeline = Pipeline::new(MockTools::with_model("K2P"), config).unwrap();
        assert!(matches!(pipeline.run(&s), Err(Error::InvalidInput(_))));
        assert!(pipeline.tools().calls.is_empty());
    }

    #[test]
    fn fixed_model() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 2);
        let config = Config { model: Model::new("JC"), ..Config::default() };
        let mut pipeline = Pipeline::new(MockTools::default(), config).unwrap();
        pipeline.run(&s).unwrap();
        assert_eq!(pipeline.tools().calls, vec![align(&s[0]), tree(&s[0], "JC"), align(&s[1]), tree(&s[1], "JC")]);
    }

    #[test]
    fn rerun_none_skips_completed() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 3);
        fs::write(s[0].alignment(), b">a\nAC\n").unwrap();
        fs::write(s[0].aligned_file(), b"").unwrap();
        fs::write(s[1].success_file(), b"").unwrap();
        let config = Config { rerun: Rerun::None, ..Config::default() };
        let mut pipeline = Pipeline::new(MockTools::with_model("GTR+F+I"), config).unwrap();
        let summary = pipeline.run(&s).unwrap();
        assert_eq!(summary, Summary { total: 3, succeeded: 2, skipped: 1, failed: 0 });
        assert_eq!(pipeline.tools().calls, vec![
            select(&s[0]), tree(&s[0], "GTR+F+I"),
            align(&s[2]), tree(&s[2], "GTR+F+I"),
        ]);
    }

    #[test]
    fn rerun_all_clears_old_success() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 2);
        fs::write(s[0].alignment(), b">a\nAC\n").unwrap();
        fs::write(s[1].success_file(), b"").unwrap();
        let mut tools = MockTools::with_model("GTR+F+I");
        tools.tree_failures.insert(s[1].tree_prefix().to_owned(), u32::MAX);
        let mut pipeline = Pipeline::new(tools, Config::default()).unwrap();
        let summary = pipeline.run(&s).unwrap();
        assert_eq!(summary.failed, 1);
        assert!(!s[1].success_file().exists());
        // Existing alignment is not reused.
        assert_eq!(pipeline.tools().calls[0], align(&s[0]));
    }

    #[test]
    fn tree_retries_exhausted() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 3);
        let mut tools = MockTools::with_model("GTR+F+I");
        tools.tree_failures.insert(s[1].tree_prefix().to_owned(), u32::MAX);
        let config = Config { on_tree_fail: FailPolicy::Retry(2), ..Config::default() };
        let mut pipeline = Pipeline::new(tools, config).unwrap();
        assert!(matches!(pipeline.run(&s), Err(Error::Subprocess(_))));
        let calls = &pipeline.tools().calls;
        assert_eq!(calls.iter().filter(|&call| *call == tree(&s[1], "GTR+F+I")).count(), 3);
        assert_eq!(calls.last(), Some(&tree(&s[1], "GTR+F+I")));
        assert!(!calls.contains(&align(&s[2])));
        assert!(!s[1].success_file().exists());
    }

    #[test]
    fn model_retries_exhausted() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 2);
        let tools = MockTools {
            models: VecDeque::from(vec![None, None, None, Some("HKY+F")]),
            ..MockTools::default()
        };
        let config = Config { on_model_fail: FailPolicy::Retry(2), ..Config::default() };
        let mut pipeline = Pipeline::new(tools, config).unwrap();
        assert!(matches!(pipeline.run(&s), Err(Error::RuntimeError(_))));
        assert_eq!(pipeline.tools().calls, vec![align(&s[0]), select(&s[0]), select(&s[0]), select(&s[0])]);
    }

    #[test]
    fn aborted_alignment_is_redone_on_resume() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 2);
        // Completed in some earlier run.
        fs::write(s[0].alignment(), b">a\nACGT\n").unwrap();
        fs::write(s[0].aligned_file(), b"").unwrap();
        fs::write(s[0].success_file(), b"").unwrap();

        let mut tools = MockTools::with_model("GTR+F+I");
        tools.align_failures.insert(s[0].input().to_owned(), 1);
        let mut pipeline = Pipeline::new(tools, Config::default()).unwrap();
        assert!(matches!(pipeline.run(&s), Err(Error::Subprocess(_))));
        assert!(sys_ext::non_empty_file(s[0].alignment()));
        assert!(!s[0].aligned_file().exists());
        assert!(!s[0].success_file().exists());

        let config = Config { rerun: Rerun::None, ..Config::default() };
        let mut pipeline = Pipeline::new(MockTools::with_model("GTR+F+I"), config).unwrap();
        let summary = pipeline.run(&s).unwrap();
        assert_eq!(summary, Summary { total: 2, succeeded: 2, skipped: 0, failed: 0 });
        assert_eq!(pipeline.tools().calls, vec![
            align(&s[0]), select(&s[0]), tree(&s[0], "GTR+F+I"),
            align(&s[1]), tree(&s[1], "GTR+F+I"),
        ]);
    }

    #[test]
    fn rerun_part_reuses_completed_alignments_only() {
        let root = tempfile::tempdir().unwrap();
        let s = create_samples(root.path(), 2);
        for sample in s.iter() {
            fs::write(sample.alignment(), b">a\nAC\n").unwrap();
        }
        fs::write(s[1].aligned_file(), b"").unwrap();
        let config = Config { rerun: Rerun::Part, ..Config::default() };
        let mut pipeline = Pipeline::new(MockTools::with_model("GTR+F+I"), config).unwrap();
        pipeline.run(&s).unwrap();
        assert_eq!(pipeline.tools().calls, vec![
            align(&s[0]), select(&s[0]), tree(&s[0], "GTR+F+I"),
            tree(&s[1], "GTR+F+I"),
        ]);
        assert!(s.iter().all(|sample| sample.aligned_file().exists()));
    }

    #[test]
    fn parse_policies() {
        assert_eq!("abort".parse::<FailPolicy>().unwrap(), FailPolicy::Abort);
        assert_eq!("Skip".parse::<FailPolicy>().unwrap(), FailPolicy::Skip);
        assert_eq!("retry".parse::<FailPolicy>().unwrap(), FailPolicy::Retry(1));
        assert_eq!("retry:3".parse::<FailPolicy>().unwrap(), FailPolicy::Retry(3));
        assert!("retry=5".parse::<FailPolicy>().is_err());
        assert!("continue".parse::<FailPolicy>().is_err());
        assert!("retry:x".parse::<FailPolicy>().is_err());
        assert!("ignore".parse::<FailPolicy>().is_err());
        assert_eq!(FailPolicy::Retry(3).to_string(), "retry:3");

        assert_eq!("part".parse::<Rerun>().unwrap(), Rerun::Part);
        assert_eq!("NONE".parse::<Rerun>().unwrap(), Rerun::None);
        assert!("some".parse::<Rerun>().is_err());
        assert!("full".parse::<Rerun>().is_err());
        assert_eq!(Rerun::All.to_string(), "all");
    }
}
