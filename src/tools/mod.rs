//! External programs, called by the pipeline.

pub mod mafft;
pub mod iqtree;

use std::{
    fmt,
    path::Path,
    str::FromStr,
};
use crate::Error;
pub use mafft::Mafft;
pub use iqtree::IqTree;

/// Substitution model name, such as `GTR+F+I`. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model(String);

impl Model {
    /// Returns None if the name is empty or contains whitespace.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() || name.contains(char::is_whitespace) {
            None
        } else {
            Some(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim()).ok_or_else(|| format!("Invalid substitution model {:?}", s))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Three steps, performed by external tools.
/// Tree construction requires a model, so it cannot be called before the model is known.
pub trait Tools {
    /// Aligns `input` multifasta file into `output`.
    fn align(&mut self, input: &Path, output: &Path) -> Result<(), Error>;

    /// Selects substitution model based on the alignment. Returns None if the model cannot be established.
    fn select_model(&mut self, alignment: &Path) -> Result<Option<Model>, Error>;

    /// Builds phylogenetic tree and writes output files to `prefix.*`.
    fn build_tree(&mut self, alignment: &Path, model: &Model, prefix: &Path) -> Result<(), Error>;
}

/// MAFFT + IQ-TREE.
pub struct External {
    pub mafft: Mafft,
    pub iqtree: IqTree,
}

impl Tools for External {
    fn align(&mut self, input: &Path, output: &Path) -> Result<(), Error> {
        self.mafft.align(input, output)
    }

    fn select_model(&mut self, alignment: &Path) -> Result<Option<Model>, Error> {
        self.iqtree.select_model(alignment)
    }

    fn build_tree(&mut self, alignment: &Path, model: &Model, prefix: &Path) -> Result<(), Error> {
        self.iqtree.build_tree(alignment, model, prefix)
    }
}
