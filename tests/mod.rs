mod common;
mod remote_failures;
