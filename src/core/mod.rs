pub mod chat_client;
pub mod config;
pub mod controller;
pub mod history;
pub mod message;
