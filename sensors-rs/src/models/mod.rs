pub mod config;
pub(crate) mod shutdown;
