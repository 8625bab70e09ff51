pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod page;
pub mod session;
pub mod ui;
pub mod update;
