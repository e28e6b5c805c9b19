pub mod diff_row;
pub mod diff_session;
