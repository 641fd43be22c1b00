pub mod cli;
pub mod cmd;
pub mod fs;
pub mod mem;
pub mod partition;
pub mod types;
pub mod wipe;
