pub mod config_helper;
pub mod language_detector;
pub mod url_parser;
