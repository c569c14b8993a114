//! Outbound chat messaging (Telegram today, behind a port).

pub mod notify;
pub mod port;

pub use notify::send_message;
