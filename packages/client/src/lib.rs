//! Terminal chat client for Tuganire.
//!
//! Keeps a WebSocket connection to the Tuganire server, renders incoming chat
//! events into a terminal view, sends debounced typing indicators, and drives
//! the server's HTTP endpoints for user search and room navigation.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
pub mod error;
