//! huddle command-line client library.
//!
//! Turns `huddle` subcommands into calls on [`huddle_api::MeetingClient`]
//! and prints the results as JSON.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod secret;
