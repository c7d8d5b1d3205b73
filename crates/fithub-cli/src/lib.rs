pub mod cli;
pub mod commands;
pub mod formatting;
pub mod logging;
