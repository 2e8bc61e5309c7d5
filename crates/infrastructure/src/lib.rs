pub mod dns;
pub mod public_suffix;
pub mod system;
