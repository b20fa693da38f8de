use chrono::Duration;
use url::Url;

// -------------------------------------------------------------------------------------------------
// Error
// -------------------------------------------------------------------------------------------------
#[derive(Debug)]
pub enum Error {
    RateLimited {
        /// The message returned by the provider
        message: String,

        /// The duration to wait until trying again
        wait: Option<Duration>,
    },
    UrlParseError(url::ParseError),
    UrlBaseError(Url),
    UrlSlashError(String),
    ReqwestError(reqwest::Error),

    /// A paginated listing was still returning full pages at the page ceiling
    PaginationOverrun {
        max_pages: u32,
    },

    /// A file changed since it was read
    VersionConflict {
        path: String,
    },

    /// A response body could not be interpreted
    Decode(String),
}

impl Error {
    /// Is this an error that must not be masked by treating the failing listing as empty?
    pub fn is_pagination_overrun(&self) -> bool {
        matches!(self, Error::PaginationOverrun { .. })
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::RateLimited { message, .. } => write!(f, "request was rate-limited: {message}"),
            Error::UrlParseError(e) => write!(f, "error parsing URL: {e}"),
            Error::UrlBaseError(u) => write!(f, "error building URL: {u} cannot be a base"),
            Error::UrlSlashError(p) => write!(f, "error building URL: component {p:?} contains a slash"),
            Error::ReqwestError(e) => write!(f, "error making request: {e}"),
            Error::PaginationOverrun { max_pages } => {
                write!(f, "listing did not end after {max_pages} full pages")
            }
            Error::VersionConflict { path } => {
                write!(f, "{path} was modified since it was read; refusing to overwrite it")
            }
            Error::Decode(msg) => write!(f, "error decoding response: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::RateLimited { .. } => None,
            Error::UrlParseError(e) => Some(e),
            Error::UrlBaseError(_) => None,
            Error::UrlSlashError(_) => None,
            Error::ReqwestError(e) => Some(e),
            Error::PaginationOverrun { .. } => None,
            Error::VersionConflict { .. } => None,
            Error::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::ReqwestError(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::UrlParseError(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
