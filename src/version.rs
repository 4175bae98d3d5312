// Name and version reported by GET /version

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name; also the first word of the startup log line.
pub const NAME: &str = env!("CARGO_PKG_NAME");
