//! Startup idea validator client
//!
//! A terminal front-end for an idea-validation backend: collect the
//! pitch, send it to a panel of AI critics, and present the verdict.
//! The library surface exists so integration tests can exercise the
//! request, wire, and rendering layers without a terminal.

pub mod api;
pub mod app;
pub mod config;
pub mod model;
pub mod render;
pub mod request;
pub mod session;
pub mod ui;
