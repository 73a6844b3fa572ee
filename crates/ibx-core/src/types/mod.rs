mod ea;
mod fixed_address;
mod network;
mod reference;
mod zone;

pub use ea::*;
pub use fixed_address::*;
pub use network::*;
pub use reference::*;
pub use zone::*;

/// Name of the view used when none is configured
pub const DEFAULT_VIEW: &str = "default";
