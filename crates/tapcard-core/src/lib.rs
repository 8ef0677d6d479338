//! Shared foundation for the tapcard workspace: configuration, core error
//! type, route constants, the clock abstraction, and small utilities.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod util;
