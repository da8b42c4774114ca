pub mod channel_config;
