use thiserror::Error;

/// Errors the counting pipelines can surface to callers.
///
/// Decode failures are distinguished from processing faults so callers can
/// branch without string matching. An empty mask, zero contours, or an empty
/// Hough result are valid zero counts, not errors.
#[derive(Debug, Error)]
pub enum CountError {
    /// The input bytes could not be interpreted as an image.
    #[error("failed to decode input image: {0}")]
    DecodeFailure(#[from] image::ImageError),

    /// Any unexpected fault during a pipeline stage. Not retried; callers
    /// must resubmit.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}
