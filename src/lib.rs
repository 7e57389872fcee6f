pub mod config;
pub mod detection;
pub mod error;
pub mod models;

pub use config::{CircleConfig, CountingConfig, EmptySpaceConfig};
pub use detection::{EmptySpaceDetector, ObjectCounter};
pub use error::CountError;
pub use models::{
    BoundingBox, CountEstimates, CountMethod, EmptySpaceResult, ProcessingResult,
};
