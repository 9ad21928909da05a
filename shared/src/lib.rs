pub mod frame;
pub mod io;
pub mod logging;
pub mod vehicle;

pub use frame::Frame;
pub use logging::{init_logging, LoggingConfig};
pub use vehicle::*;
pub use log::{debug, error, info, trace, warn};

pub const VERSION_STR: &str = "0.1.0";
