//! Terminal output and prompts for the command line front-end.
//!
//! - [`display`]: credential output, verification results, limits table
//! - [`prompt`]: password entry

pub mod display;
pub mod prompt;
