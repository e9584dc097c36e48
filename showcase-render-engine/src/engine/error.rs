use thiserror::Error;

/// Failure to obtain the shared model. The only error the showcase recovers
/// from: viewports are still built, they just show no model.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("failed to load model '{path}': {reason}")]
    Failed { path: String, reason: String },
    #[error("model '{path}' has no handle; the load was never issued")]
    NotRequested { path: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid showcase config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config declares {found} viewports, at least one is required")]
    NoViewports { found: usize },
}

/// Rejected scroll marker, e.g. `"top middle"`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MarkerParseError {
    #[error("marker '{0}' must be two words: '<element edge> <viewport edge>'")]
    Shape(String),
    #[error("unknown edge '{0}', expected top, center, bottom or a percentage")]
    Edge(String),
}
