//! Generation coordination: run one backend call while a progress indicator
//! animates, and leave the terminal line clean afterwards.

pub mod coordinator;
pub mod indicator;

pub use coordinator::{ActiveBackend, FALLBACK_MESSAGE, GenerationCoordinator, GenerationError};
pub use indicator::ProgressIndicator;
