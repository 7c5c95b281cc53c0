//! Where the finished archive goes. Only local files are supported.

pub mod save_file;
