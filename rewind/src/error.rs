use thiserror::Error;

/// A recording that cannot be replayed.
///
/// Every variant is detected once, while a [`ReplaySession`](crate::ReplaySession) is
/// constructed. Nothing is truncated or patched up: a malformed recording never starts playing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedLog {
    #[error("The reference text is empty")]
    EmptyText,

    #[error("Expected {expected} delays (one per character), found {found}")]
    DelayCount { expected: usize, found: usize },

    #[error("Expected {expected} raw delays (one per character), found {found}")]
    RawDelayCount { expected: usize, found: usize },

    #[error("Invalid delay at character {index}: {value}")]
    InvalidDelay { index: usize, value: f64 },

    #[error("Invalid raw delay at character {index}: {value}")]
    InvalidRawDelay { index: usize, value: f64 },

    #[error("Invalid time delta at action {index}: {value}")]
    InvalidTimeDelta { index: usize, value: f64 },

    #[error("Segments cover {found} characters, but the text has {expected}")]
    SegmentLength { expected: usize, found: usize },
}
