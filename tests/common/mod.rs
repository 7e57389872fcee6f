mod fixtures;
pub use fixtures::*;
