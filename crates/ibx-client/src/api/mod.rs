//! Per-object WAPI endpoints.

mod fixed_address;
mod network;
mod zone;

pub use fixed_address::{FixedAddressApi, FixedAddressSearchBuilder};
pub use network::NetworkApi;
pub use zone::ZoneAuthApi;

use ibx_core::ExtAttrs;

/// Turn extensible attributes into WAPI search parameters (`*Key=value`)
pub(crate) fn ea_search_params(ea: &ExtAttrs) -> Vec<(String, String)> {
    ea.iter()
        .map(|(k, v)| (format!("*{k}"), v.to_string()))
        .collect()
}
