//! Dictionary-driven spelling utilities.
//!
//! This module holds the word frequency dictionary, the edit-distance
//! corrector, the per-file typo finder and the dictionary maintenance
//! workflow.

pub mod corrector;
pub mod dictionary;
pub mod trainer;
pub mod typo_finder;

// Re-export commonly used types
pub use corrector::{Corrector, correct};
pub use dictionary::Dictionary;
pub use trainer::{Trainer, TrainingPlan, TrainingReport};
pub use typo_finder::{ScanOptions, ScanPhase, ScanResult, TypoFinder};
