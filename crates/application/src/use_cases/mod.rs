pub mod discover_zone;
pub mod txt_propagation;

pub use discover_zone::DiscoverAuthoritativeZoneUseCase;
pub use txt_propagation::{
    CheckTxtPropagationUseCase, PropagationReport, ServerCheck, TxtOutcome,
};
