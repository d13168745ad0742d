pub mod clash;

pub use clash::{get_cl_normal_config, get_cl_warp_config, ClashDocument};
