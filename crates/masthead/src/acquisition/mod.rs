//! Page acquisition: HTTP fetching, origin handling and staff-page discovery.

pub mod http_client;
pub mod origin;
pub mod staff_locator;
