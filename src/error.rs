use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    /// Rejected before any clause is written.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The sink refused a write. Lines written before the failure are left as they are.
    #[error("write failed: {0}")]
    WriteFailure(#[from] std::io::Error),

    /// A clause size larger than the variable pool was drawn.
    #[error("cannot sample {requested} distinct variables from a pool of {available}")]
    SamplingImpossible { requested: usize, available: usize },

    /// The observer asked for generation to stop after `written` clauses.
    #[error("cancelled after {written} clauses")]
    Cancelled { written: usize },
}
