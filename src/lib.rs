pub mod cli;
pub mod config;
pub mod dispatch;
pub mod gate;
pub mod logging;
pub mod probe;
pub mod remote;
pub mod schemas;
pub mod server;
pub mod wol;
