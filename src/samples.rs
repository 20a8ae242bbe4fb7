//! Discovery of sampled genome sets.

use std::{
    fs,
    fmt,
    path::{Path, PathBuf},
};
use crate::{
    Error,
    err::{add_path, error},
    command::paths,
};

/// Returns the integer that follows the first underscore: `Sample_12 -> 12`.
pub fn sample_index(name: &str) -> Result<u64, Error> {
    let field = name.split('_').nth(1)
        .ok_or_else(|| error!(InvalidInput, "Sample name '{}' does not contain '_<index>'", name))?;
    field.parse()
        .map_err(|_| error!(InvalidInput, "Sample name '{}': cannot parse index from '{}'", name, field))
}

/// One sampled genome set, stored in `<root>/<name>`.
#[derive(Clone, Debug)]
pub struct Sample {
    name: String,
    index: u64,
    dir: PathBuf,
    /// Input multifasta file.
    input: PathBuf,
    /// Aligned multifasta file.
    alignment: PathBuf,
    /// Prefix for all IQ-TREE output files.
    tree_prefix: PathBuf,
}

impl Sample {
    pub fn new(root: &Path, name: String, sample_size: u32) -> Result<Self, Error> {
        let index = sample_index(&name)?;
        let dir = root.join(&name);
        let stem = format!("{}_{}_{}+1", paths::GENOMES_PREFIX, name, sample_size);
        Ok(Self {
            input: dir.join(format!("{}.fasta", stem)),
            alignment: dir.join(format!("{}{}.fasta", stem, paths::ALIGNMENT_SUFFIX)),
            tree_prefix: dir.join(&name),
            name, index, dir,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn alignment(&self) -> &Path {
        &self.alignment
    }

    pub fn tree_prefix(&self) -> &Path {
        &self.tree_prefix
    }

    pub fn aligned_file(&self) -> PathBuf {
        self.dir.join(paths::ALIGNED)
    }

    pub fn success_file(&self) -> PathBuf {
        self.dir.join(paths::SUCCESS)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Creates samples from entry names and orders them by index.
/// Any name without a parsable index makes the whole list invalid.
pub fn samples_from_names<I>(root: &Path, names: I, sample_size: u32) -> Result<Vec<Sample>, Error>
where I: IntoIterator<Item = String>,
{
    let mut samples = names.into_iter()
        .map(|name| Sample::new(root, name, sample_size))
        .collect::<Result<Vec<_>, _>>()?;
    samples.sort_by_key(Sample::index);
    Ok(samples)
}

/// Lists all entries of the samples root and returns them as samples in ascending index order.
/// Entries are not filtered, so every entry (file or directory) must be named `<prefix>_<index>`.
pub fn list_samples(root: &Path, sample_size: u32) -> Result<Vec<Sample>, Error> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root).map_err(add_path!(root))? {
        let entry = entry.map_err(add_path!(root))?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => return Err(error!(InvalidInput, "Sample name {:?} is not a valid UTF-8", name)),
        }
    }
    if names.is_empty() {
        return Err(error!(InvalidInput, "No samples found in {}", crate::ext::fmt::path(root)));
    }
    samples_from_names(root, names, sample_size)
}
