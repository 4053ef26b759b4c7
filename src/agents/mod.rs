pub mod gemini;
pub mod traits;
pub mod types;

pub use gemini::GeminiConcierge;
pub use traits::{ConciergeService, Discovery};
