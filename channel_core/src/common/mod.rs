pub mod channel_error;
pub mod enums;
pub mod time;
