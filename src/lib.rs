#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod shell;
pub mod state;
pub mod utils;
