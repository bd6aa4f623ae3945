//! Interactive front end for the PhoneBook contact store.
//!
//! # Responsibility
//! - Translate typed commands into `ContactStore` calls.
//! - Re-render the visible list after every mutation.
//!
//! # Invariants
//! - Listed rows carry their structured `Contact`; rendered lines are never
//!   parsed back into fields.

pub mod prompt;
pub mod shell;

pub use prompt::{EditorPrompt, Prompt};
pub use shell::{parse_command, Command, Shell, ShellError};
