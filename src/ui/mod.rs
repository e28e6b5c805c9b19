pub mod diff_server;
pub mod session_manager;
