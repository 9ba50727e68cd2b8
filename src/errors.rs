use std::fmt;

/// Cause of a best-effort degradation.
///
/// The suggestion and planning flows never fail a whole request over an
/// upstream problem; they return a degraded payload instead. Carrying the
/// cause in the error variant keeps the degradation observable to callers
/// and tests rather than hiding it behind a blanket catch-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degraded {
    MissingCredential(&'static str),
    Upstream(String),
    Malformed(String),
}

impl fmt::Display for Degraded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degraded::MissingCredential(name) => write!(f, "Missing credential: {}", name),
            Degraded::Upstream(msg) => write!(f, "Upstream request failed: {}", msg),
            Degraded::Malformed(msg) => write!(f, "Malformed upstream response: {}", msg),
        }
    }
}

impl std::error::Error for Degraded {}

impl From<reqwest::Error> for Degraded {
    fn from(err: reqwest::Error) -> Self {
        Degraded::Upstream(err.to_string())
    }
}
