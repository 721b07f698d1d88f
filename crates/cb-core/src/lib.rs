pub mod config;
pub mod cookbook;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod steps;
pub mod store;
pub mod templates;
pub mod timer;
pub mod variant;

mod tests;

pub use config::{AppConfig, LoadingConfig, ResetPolicy};
pub use cookbook::{Cookbook, CookbookStatus, CookbookType, GenerationRequest, GenerationResponse, Length, Tone};
pub use error::{Error, Result};
pub use pipeline::CookbookGenerator;
pub use progress::{ProgressCallback, ProgressMode, ProgressSimulator, StepState};
pub use steps::GenerationStep;
pub use store::CookbookStore;
pub use timer::RepeatingTimer;
pub use variant::{Variant, VariantStyle};
