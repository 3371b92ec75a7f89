use crate::error::AnalyzerError;

/// Crate-wide `Result` alias with `AnalyzerError` as the default error.
pub type Result<T, E = AnalyzerError> = std::result::Result<T, E>;
