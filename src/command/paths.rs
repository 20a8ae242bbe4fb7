//! Default locations and names of the files, produced and consumed by the pipeline.

/// Sample directories are stored in `SAMPLES_DIR/<sample>`.
pub(crate) const SAMPLES_DIR: &'static str = "Samples";
/// Input genome set is stored in `Samples/<sample>/GENOMES_PREFIX_<sample>_<size>+1.fasta`.
pub(crate) const GENOMES_PREFIX: &'static str = "SARS-CoV-2";
/// Multiple sequence alignment is stored next to the input, with `ALIGNMENT_SUFFIX` added to the file stem.
pub(crate) const ALIGNMENT_SUFFIX: &'static str = "_msa";
/// IQ-TREE model selection results are stored in `MODEL_DIR/MODEL_PREFIX.*`.
pub(crate) const MODEL_DIR: &'static str = "model_selector";
pub(crate) const MODEL_PREFIX: &'static str = "model_selection";

/// File, created once MAFFT finished successfully. Without it, the alignment is never reused.
pub(crate) const ALIGNED: &'static str = "aligned";
/// File, created on the successful completion of a sample.
pub(crate) const SUCCESS: &'static str = "success";
