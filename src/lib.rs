//! sessionchat is a terminal chat client that keeps one in-memory transcript
//! per session id and asks a hosted chat-completion API for each reply.
//!
//! The crate is organized around a small set of layers:
//! - [`core`] owns the turn model, the per-session history store, the chat
//!   backend, configuration, and the controller state machine that ties them
//!   together.
//! - [`ui`] renders the terminal interface and runs the interactive loop that
//!   feeds key presses to the controller.
//! - [`api`] defines the chat-completion payloads sent over the wire.
//! - [`cli`] parses arguments and dispatches to the chat loop or the
//!   one-shot commands.
//!
//! The binary (`src/main.rs`) routes straight through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;
