use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Pagination control not found: {0}")]
    Pagination(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Why a listing cell produced no record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("missing element: {0}")]
    MissingElement(&'static str),

    #[error("title has {0} part(s), expected 2")]
    TitleShape(usize),

    #[error("unparsable date '{0}'")]
    UnparsableDate(String),

    #[error("no launch site in supporting text")]
    MissingSite,

    #[error("malformed detail link '{0}'")]
    MalformedLink(String),

    #[error("invalid launch identifier '{0}'")]
    InvalidIdentifier(String),
}

impl SkipReason {
    /// Short stable label, used to group skips in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::MissingElement(_) => "missing_element",
            SkipReason::TitleShape(_) => "title_shape",
            SkipReason::UnparsableDate(_) => "unparsable_date",
            SkipReason::MissingSite => "missing_site",
            SkipReason::MalformedLink(_) => "malformed_link",
            SkipReason::InvalidIdentifier(_) => "invalid_identifier",
        }
    }
}
