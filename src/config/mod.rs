//! Configuration: environment-driven settings plus fixed constants
//! (identifier pattern, slug rules, upload folders).

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
