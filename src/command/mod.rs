pub(crate) mod paths;

use std::{
    path::PathBuf,
    time::Instant,
};
use colored::Colorize;
use const_format::str_repeat;
use crate::{
    Error,
    err::validate_param,
    ext::{fmt as fmt_ext, sys as sys_ext},
    samples,
    pipeline::{Pipeline, Config, Summary},
    tools::{External, Mafft, IqTree},
};

pub(crate) const PKG_NAME: &'static str = env!("CARGO_PKG_NAME");
const PKG_VERSION: &'static str = env!("CARGO_PKG_VERSION");

/// Print tool version.
fn print_version() {
    println!("{} {}", PKG_NAME.underline(), format!("v{}", PKG_VERSION).green());
}

fn fmt_def(defval: impl std::fmt::Display) -> colored::ColoredString {
    defval.to_string().cyan()
}

struct Args {
    samples: PathBuf,
    outgroup: String,
    sample_size: u32,
    seed: u64,
    threads: u16,
    model_dir: PathBuf,
    mafft: PathBuf,
    iqtree: PathBuf,
    config: Config,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            samples: PathBuf::from(paths::SAMPLES_DIR),
            outgroup: "NC_045512.2".to_owned(),
            sample_size: 5250,
            seed: 21,
            threads: u16::try_from(num_cpus::get()).unwrap_or(u16::MAX),
            model_dir: PathBuf::from(paths::MODEL_DIR),
            mafft: PathBuf::from("mafft"),
            iqtree: PathBuf::from("iqtree2"),
            config: Config::default(),
        }
    }
}

impl Args {
    /// Validate arguments, and find executables.
    fn validate(mut self) -> Result<Self, Error> {
        validate_param!(self.threads > 0, "Number of threads must be positive");
        validate_param!(!self.outgroup.trim().is_empty(), "Outgroup sequence name is empty");
        validate_param!(self.samples.is_dir(), "Samples directory {} does not exist (see -i/--samples)",
            fmt_ext::path(&self.samples));
        self.mafft = sys_ext::find_exe(self.mafft)?;
        self.iqtree = sys_ext::find_exe(self.iqtree)?;
        Ok(self)
    }
}

fn print_help() {
    const KEY: usize = 19;
    const VAL: usize = 5;
    const EMPTY: &'static str = str_repeat!(" ", KEY + VAL + 5);

    let defaults = Args::default();
    println!("{}", "Align sampled genome sets and construct phylogenetic trees.".yellow());
    println!("\n{} {} [arguments]", "Usage:".bold(), PKG_NAME);

    println!("\n{}", "Input arguments:".bold());
    println!("    {:KEY$} {:VAL$}  Directory with sample subdirectories <name>_<index> [{}].\n\
        {EMPTY}  Sample {} is read from {}.",
        "-i, --samples".green(), "DIR".yellow(), fmt_def(defaults.samples.display()), "S".yellow(),
        "DIR/S/SARS-CoV-2_S_SIZE+1.fasta".underline());
    println!("    {:KEY$} {:VAL$}  Number of genomes in each sample, used in file names [{}].",
        "-n, --sample-size".green(), "INT".yellow(), fmt_def(defaults.sample_size));
    println!("    {:KEY$} {:VAL$}  Outgroup sequence, used to root the trees [{}].",
        "-o, --outgroup".green(), "STR".yellow(), fmt_def(&defaults.outgroup));

    println!("\n{}", "Substitution model:".bold());
    println!("    {:KEY$} {:VAL$}  Use this substitution model and skip model selection.",
        "-m, --model".green(), "STR".yellow());
    println!("    {:KEY$} {:VAL$}  Select substitution model on this sample [{}].\n\
        {EMPTY}  The model is then used for all samples.",
        "    --model-sample".green(), "STR".yellow(), fmt_def("first sample"));
    println!("    {:KEY$} {:VAL$}  Directory for model selection output [{}].",
        "    --model-dir".green(), "DIR".yellow(), fmt_def(defaults.model_dir.display()));

    println!("\n{}", "Failures:".bold());
    println!("    {:KEY$} {:VAL$}  What to do if alignment fails [{}]:\n\
        {EMPTY}  {} the run, {} the sample, or {} N more times ({} = {}).",
        "    --on-align-fail".green(), "STR".yellow(), fmt_def(defaults.config.on_align_fail),
        "abort".yellow(), "skip".yellow(), "retry:N".yellow(), "retry".yellow(), "retry:1".yellow());
    println!("    {:KEY$} {:VAL$}  What to do if model selection fails [{}]: {} or {}.",
        "    --on-model-fail".green(), "STR".yellow(), fmt_def(defaults.config.on_model_fail),
        "abort".yellow(), "retry:N".yellow());
    println!("    {:KEY$} {:VAL$}  What to do if tree construction fails [{}].",
        "    --on-tree-fail".green(), "STR".yellow(), fmt_def(defaults.config.on_tree_fail));

    println!("\n{}", "Execution parameters:".bold());
    println!("    {:KEY$} {:VAL$}  Number of threads [{}].",
        "-@, --threads".green(), "INT".yellow(), fmt_def(defaults.threads));
    println!("    {:KEY$} {:VAL$}  Random seed for tree construction [{}].",
        "-s, --seed".green(), "INT".yellow(), fmt_def(defaults.seed));
    println!("    {:KEY$} {:VAL$}  Rerun mode [{}]. Rerun everything ({}); reuse existing\n\
        {EMPTY}  completed alignments ({}); also skip completed samples ({}).",
        "    --rerun".green(), "STR".yellow(), fmt_def(defaults.config.rerun),
        "all".yellow(), "part".yellow(), "none".yellow());
    println!("    {:KEY$} {:VAL$}  MAFFT executable [{}].",
        "    --mafft".green(), "EXE".yellow(), fmt_def(defaults.mafft.display()));
    println!("    {:KEY$} {:VAL$}  IQ-TREE executable [{}].",
        "    --iqtree".green(), "EXE".yellow(), fmt_def(defaults.iqtree.display()));

    println!("\n{}", "Other parameters:".bold());
    println!("    {:KEY$} {:VAL$}  Show this help message.", "-h, --help".green(), "");
    println!("    {:KEY$} {:VAL$}  Show version.", "-V, --version".green(), "");
}

fn parse_args(argv: &[String]) -> Result<Args, lexopt::Error> {
    use lexopt::prelude::*;
    let mut args = Args::default();
    let mut parser = lexopt::Parser::from_args(argv);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('i') | Long("samples") => args.samples = parser.value()?.parse()?,
            Short('n') | Long("sample-size") => args.sample_size = parser.value()?.parse()?,
            Short('o') | Long("outgroup") => args.outgroup = parser.value()?.string()?,

            Short('m') | Long("model") => args.config.model = Some(parser.value()?.parse()?),
            Long("model-sample") => args.config.model_sample = Some(parser.value()?.string()?),
            Long("model-dir") => args.model_dir = parser.value()?.parse()?,

            Long("on-align-fail") => args.config.on_align_fail = parser.value()?.parse()?,
            Long("on-model-fail") => args.config.on_model_fail = parser.value()?.parse()?,
            Long("on-tree-fail") => args.config.on_tree_fail = parser.value()?.parse()?,

            Short('@') | Long("threads") => args.threads = parser.value()?.parse()?,
            Short('s') | Long("seed") => args.seed = parser.value()?.parse()?,
            Long("rerun") => args.config.rerun = parser.value()?.parse()?,
            Long("mafft") => args.mafft = parser.value()?.parse()?,
            Long("iqtree") => args.iqtree = parser.value()?.parse()?,

            Short('V') | Long("version") => {
                print_version();
                std::process::exit(0);
            }
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            _ => Err(arg.unexpected())?,
        }
    }
    Ok(args)
}

fn report(summary: &Summary) -> Result<(), Error> {
    if summary.skipped > 0 {
        log::info!("Skipped {} completed in previous runs", fmt_ext::Plural(summary.skipped, "sample"));
    }
    if summary.failed > 0 && summary.failed + summary.skipped == summary.total {
        return Err(Error::RuntimeError(format!("Failed to analyze all {}",
            fmt_ext::Plural(summary.failed, "sample"))));
    } else if summary.failed > 0 {
        log::warn!("Successfully analyzed {}, failed to analyze {}",
            fmt_ext::Plural(summary.succeeded, "sample"), fmt_ext::Plural(summary.failed, "sample"));
    } else {
        log::info!("Successfully analyzed {}", fmt_ext::Plural(summary.succeeded, "sample"));
    }
    Ok(())
}

/// Runs the pipeline, `argv[0]` is the program name.
pub fn run(argv: &[String]) -> crate::Result<()> {
    let args = parse_args(argv.get(1..).unwrap_or(&[]))?.validate()?;
    log::info!("{} v{}", PKG_NAME, PKG_VERSION);
    log::debug!("Command: {}", argv.join(" "));
    let timer = Instant::now();

    let samples = samples::list_samples(&args.samples, args.sample_size)?;
    log::info!("Found {} in {}", fmt_ext::Plural(samples.len(), "sample"), fmt_ext::path(&args.samples));
    let tools = External {
        mafft: Mafft {
            exe: args.mafft,
            threads: args.threads,
        },
        iqtree: IqTree {
            exe: args.iqtree,
            threads: args.threads,
            outgroup: args.outgroup,
            seed: args.seed,
            model_dir: args.model_dir,
        },
    };
    let mut pipeline = Pipeline::new(tools, args.config)?;
    let summary = pipeline.run(&samples)?;
    report(&summary)?;
    log::info!("Total time: {}", fmt_ext::Duration(timer.elapsed()));
    Ok(())
}
