use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum IntensityError {
    /// A required workbook or table could not be found at any attempted location.
    NotFound {
        what: String,
        attempted: Vec<PathBuf>,
    },
    /// A numeric cell could not be parsed.
    Parse {
        source_name: String,
        value: String,
        reason: String,
    },
    InvalidConfig(String),
    Io(std::io::Error),
    Csv(csv::Error),
    Workbook(calamine::Error),
}

pub type Result<T> = std::result::Result<T, IntensityError>;

impl IntensityError {
    pub fn not_found(what: impl Into<String>, attempted: impl Into<PathBuf>) -> Self {
        IntensityError::NotFound {
            what: what.into(),
            attempted: vec![attempted.into()],
        }
    }

    pub fn parse(source_name: &str, value: &str, reason: impl Into<String>) -> Self {
        IntensityError::Parse {
            source_name: source_name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for IntensityError {
    fn from(err: std::io::Error) -> Self {
        IntensityError::Io(err)
    }
}

impl From<csv::Error> for IntensityError {
    fn from(err: csv::Error) -> Self {
        IntensityError::Csv(err)
    }
}

impl From<calamine::Error> for IntensityError {
    fn from(err: calamine::Error) -> Self {
        IntensityError::Workbook(err)
    }
}

impl fmt::Display for IntensityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntensityError::NotFound { what, attempted } => {
                let tried: Vec<String> = attempted.iter().map(|p| p.display().to_string()).collect();
                write!(f, "{} not found. Tried: [{}]", what, tried.join(", "))
            }
            IntensityError::Parse { source_name, value, reason } => {
                write!(f, "Could not parse \"{}\" in {}: {}", value, source_name, reason)
            }
            IntensityError::InvalidConfig(s) => write!(f, "Invalid configuration: {}", s),
            IntensityError::Io(e) => write!(f, "IO error: {}", e),
            IntensityError::Csv(e) => write!(f, "CSV error: {}", e),
            IntensityError::Workbook(e) => write!(f, "Workbook error: {}", e),
        }
    }
}

impl std::error::Error for IntensityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntensityError::Io(e) => Some(e),
            IntensityError::Csv(e) => Some(e),
            IntensityError::Workbook(e) => Some(e),
            _ => None,
        }
    }
}
