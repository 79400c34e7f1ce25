use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Something that went wrong inside one simulation step. None of these are fatal: they are
/// logged, kept in the controller's issue log and surfaced through the status message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SimulationIssue {
    #[error("no START codon (AUG) found in mRNA")]
    NoStartCodonFound,
    #[error("malformed template base '{symbol}' at position {position}")]
    MalformedBase { position: usize, symbol: char },
    #[error("only {generated} of {requested} incorrect tRNA candidates could be generated")]
    CandidateGenerationDegraded { requested: usize, generated: usize },
    #[error("start codon at index {index} is not a multiple of 3")]
    OffFrameStartCodon { index: usize },
    #[error("codon {codon} has no tRNA")]
    UntranslatableCodon { codon: String },
}

#[derive(Debug, Error)]
pub enum DogmaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Simulation(#[from] SimulationIssue),
}
