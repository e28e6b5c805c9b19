pub mod backend_client;
pub mod github_client;
pub mod session_controller;
pub mod session_store;
