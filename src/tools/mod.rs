mod date_parser;
mod file_scanner;
mod partial_output;
mod path_validator;
mod scoped_child;
mod slide_range;

pub use date_parser::{default_processing_date, parse_processing_date};
pub use file_scanner::scan_matching_files;
pub use partial_output::PartialOutput;
pub use path_validator::validate_directory_exists;
pub use scoped_child::ScopedChild;
pub use slide_range::expand_slide_tokens;
