pub mod changelog;
pub mod cli;
pub mod command;
pub mod error;
pub mod forge;
pub mod repo;
pub mod result;
pub mod tag;
pub mod workspace;

pub use cli::Args;
pub use command::release;
pub use result::Result;

#[cfg(test)]
pub mod test_helpers;
