use std::fmt::Display;

/// Failures that stop the server before it accepts requests
#[derive(Debug)]
pub enum StartupError {
    Io(std::io::Error),
    Pool(r2d2::Error),
    InvalidCorsOrigin(String),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Server error: {}", e),
            Self::Pool(e) => write!(f, "Failed to connect to PG database: {}", e),
            Self::InvalidCorsOrigin(origin) => {
                write!(f, "CORS origin {:?} is not a valid header value", origin)
            }
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Pool(e) => Some(e),
            Self::InvalidCorsOrigin(_) => None,
        }
    }
}

impl From<std::io::Error> for StartupError {
    fn from(e: std::io::Error) -> Self {
        StartupError::Io(e)
    }
}

impl From<r2d2::Error> for StartupError {
    fn from(e: r2d2::Error) -> Self {
        StartupError::Pool(e)
    }
}
