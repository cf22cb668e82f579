pub mod json_file;
pub mod memory_sessions;

pub use json_file::{DataFiles, JsonFileAdapter};
pub use memory_sessions::MemorySessionStore;
