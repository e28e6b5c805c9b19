pub mod animated_logger;
pub mod session_logger;
