pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod types;

pub use config::{AccessibilityConfig, TactileConfig};
pub use error::{Result, TactileError};
pub use events::DomainEvent;
pub use feedback::{HapticMotor, Narrator, NullMotor, NullNarrator};
pub use types::*;
