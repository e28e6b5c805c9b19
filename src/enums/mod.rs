pub mod client_error;
pub mod commands;
pub mod extension_command;
pub mod request_slot;
pub mod session_status;
pub mod store_effect;
pub mod tree_entry_kind;
pub mod walker_action;
pub mod walker_state;
