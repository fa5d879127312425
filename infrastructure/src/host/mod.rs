//! Host bridge adapters.

mod process_bridge;

pub use process_bridge::{
    HOST_SESSION_ENV, HYPR_DISPATCH, HostCommand, LAUNCH_APP, ProcessHostBridge, detect_host_bridge,
};
