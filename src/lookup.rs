//! Outcome of a lookup against an upstream collaborator.

/// Result of asking the asset store or the flag bucket for something.
///
/// A miss is an ordinary outcome, distinct from the collaborator failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    UpstreamError(String),
}

impl<T> Lookup<T> {
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::NotFound => Lookup::NotFound,
            Self::UpstreamError(detail) => Lookup::UpstreamError(detail),
        }
    }
}
