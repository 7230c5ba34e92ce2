//! CineSearch server library
//!
//! Hosts the interactive web front end; the binary in `main.rs` adds the
//! one-shot command-line query mode on top.

pub mod web;

pub use web::{WebConfig, WebServer};
