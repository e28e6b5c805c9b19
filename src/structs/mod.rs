pub mod backend;
pub mod cli;
pub mod config;
pub mod diff;
pub mod github;
pub mod host;
pub mod issue;
pub mod request_ticket;
