//! Core data models for the application
//!
//! These types describe the generated document and the inputs it is built
//! from, separated from the logic that operates on them.
//!
//! ```rust
//! use clashgen::models::{ClashProxy, CommonProxyOptions};
//!
//! let common = CommonProxyOptions::builder("edge".to_string(), "1.1.1.1".to_string(), 443)
//!     .udp(true)
//!     .build();
//! let proxy = ClashProxy::new_socks5(common);
//! assert_eq!(proxy.name(), "edge");
//! ```

pub mod app_state;
pub mod clash_proxy;
pub mod protocol;
pub mod proxy_group_config;
pub mod warp;

pub use app_state::AppState;
pub use clash_proxy::{AmneziaOptions, ClashProxy, ClashProxyCommon, CommonProxyOptions};
pub use protocol::Protocol;
pub use proxy_group_config::{ClashProxyGroup, ClashProxyGroups, ProxyGroupType};
pub use warp::{Dataset, WarpAccount, RESERVED_LEN};
