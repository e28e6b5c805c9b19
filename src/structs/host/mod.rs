pub mod host_context;
pub mod host_response;
