use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Cyclic decay chain through {nuclide}: {}", chain.join(" -> "))]
    CyclicDecayChain { nuclide: String, chain: Vec<String> },

    #[error("Rejection sampling exhausted after {attempts} attempts")]
    SamplingExhausted { attempts: u64 },

    #[error("Radiation record length mismatch: energies={energies}, yields={yields}")]
    RecordMismatch { energies: usize, yields: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown volume: {0}")]
    UnknownVolume(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SourceResult<T> = Result<T, SourceError>;
