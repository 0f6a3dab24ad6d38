//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Player roster and balance commands
pub mod players;

/// Round, undo, reset and settlement commands
pub mod round;

// Export commands
pub use general::*;
pub use players::*;
pub use round::*;
