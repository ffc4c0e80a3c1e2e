//! Host integration

pub mod keep_awake;

pub use keep_awake::KeepAwake;
