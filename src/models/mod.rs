pub mod boost;
pub mod seen_set;
pub mod status;
pub mod token_info;

pub use boost::{decode_boosts, BoostLink, TokenBoost};
pub use seen_set::SeenSet;
pub use status::{MonitorStatus, SharedStatus};
pub use token_info::{PairsResponse, Social, TokenInfo, Website};
