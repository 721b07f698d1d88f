use std::time::Duration;

use crate::cookbook::{GenerationRequest, GenerationResponse};
use crate::error::Result;
use crate::progress::ProgressCallback;

/// Trait for cookbook generation backends
pub trait CookbookGenerator: Send + Sync {
    /// Generate a cookbook, reporting real progress through `progress`
    fn generate(&self, request: &GenerationRequest, progress: &mut dyn ProgressCallback) -> Result<GenerationResponse>;

    /// Get generator name
    fn name(&self) -> &str;

    /// Estimated generation time
    fn estimated_time(&self, request: &GenerationRequest) -> Duration {
        request.length.expected_duration()
    }
}
