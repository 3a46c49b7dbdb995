pub mod path;
pub mod prompt;
pub mod table;
