pub mod boost_monitor;
pub mod dexscreener;
pub mod formatter;
pub mod notification_handler;
pub mod sleeper;

pub use boost_monitor::{BoostMonitor, CycleReport};
pub use dexscreener::{BoostSource, DexScreenerClient};
pub use formatter::format_boost_message;
pub use notification_handler::{Notifier, TelegramNotifier};
pub use sleeper::{Sleeper, TokioSleeper};
