pub mod filter;
pub mod loader;
pub mod parser;
pub mod report;
pub mod schema;
pub mod sibling_cursor;
pub mod stats;
pub mod table;
