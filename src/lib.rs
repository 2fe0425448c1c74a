//! Launcher, configuration layer and demo client for the Dingo marketing
//! automation API.

pub mod api;
pub mod cli;
pub mod config;
pub mod demo;
pub mod logging;
