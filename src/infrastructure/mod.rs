//! Infrastructure layer
//!
//! Ambient adapters around the codec. The codec itself performs no I/O;
//! this module only hosts process-level concerns for embedding applications.

mod logging;

pub use logging::init_logging;
