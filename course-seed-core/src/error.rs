use std::fmt;

/// Custom error type for course seed operations
#[derive(Debug)]
pub enum SeedError {
    /// Input file missing or not a supported spreadsheet
    Input(String),
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(std::io::Error),
    /// Workbook decoding errors
    Sheet(calamine::Error),
    /// CSV decoding errors
    Csv(csv::Error),
    /// YAML parsing errors
    Yaml(serde_yaml::Error),
    /// JSON serialization errors
    Json(serde_json::Error),
    /// Regular expression compile errors
    Regex(regex::Error),
    /// Generic errors with message
    Generic(String),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Input(msg) => write!(f, "Input error: {}", msg),
            SeedError::Config(msg) => write!(f, "Configuration error: {}", msg),
            SeedError::Io(err) => write!(f, "I/O error: {}", err),
            SeedError::Sheet(err) => write!(f, "Spreadsheet error: {}", err),
            SeedError::Csv(err) => write!(f, "CSV error: {}", err),
            SeedError::Yaml(err) => write!(f, "YAML error: {}", err),
            SeedError::Json(err) => write!(f, "JSON error: {}", err),
            SeedError::Regex(err) => write!(f, "Regex error: {}", err),
            SeedError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeedError::Io(err) => Some(err),
            SeedError::Sheet(err) => Some(err),
            SeedError::Csv(err) => Some(err),
            SeedError::Yaml(err) => Some(err),
            SeedError::Json(err) => Some(err),
            SeedError::Regex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SeedError {
    fn from(err: std::io::Error) -> Self {
        SeedError::Io(err)
    }
}

impl From<calamine::Error> for SeedError {
    fn from(err: calamine::Error) -> Self {
        SeedError::Sheet(err)
    }
}

impl From<csv::Error> for SeedError {
    fn from(err: csv::Error) -> Self {
        SeedError::Csv(err)
    }
}

impl From<serde_yaml::Error> for SeedError {
    fn from(err: serde_yaml::Error) -> Self {
        SeedError::Yaml(err)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(err: serde_json::Error) -> Self {
        SeedError::Json(err)
    }
}

impl From<regex::Error> for SeedError {
    fn from(err: regex::Error) -> Self {
        SeedError::Regex(err)
    }
}

impl From<anyhow::Error> for SeedError {
    fn from(err: anyhow::Error) -> Self {
        SeedError::Generic(err.to_string())
    }
}

/// Result type alias for course seed operations
pub type Result<T> = std::result::Result<T, SeedError>;
