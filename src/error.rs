use thiserror::Error;

/// Errors that can occur while converting bitmap fonts to outlines.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("failed to load image: {0}")]
    ImageLoad(String),

    #[error("missing resource: {0}")]
    MissingResource(String),

    #[error("invalid resource id: {0:?}")]
    InvalidResourceId(String),

    #[error("font reference cycle through {0}")]
    ReferenceCycle(String),

    #[error("invalid provider: {0}")]
    InvalidProvider(String),

    #[error("invalid glyph name list at line {line}: {reason}")]
    InvalidNameList { line: usize, reason: String },

    #[error("region has no set cells")]
    EmptyRegion,

    #[error("boundary did not close after {steps} steps")]
    UnclosedBoundary { steps: usize },

    #[error("empty contour")]
    EmptyContour,

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[cfg(feature = "ufo")]
    #[error("norad error: {0}")]
    Norad(#[from] norad::error::FontLoadError),

    #[cfg(feature = "ufo")]
    #[error("norad write error: {0}")]
    NoradWrite(#[from] norad::error::FontWriteError),
}
