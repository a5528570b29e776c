//! CLI module for the kimiai demo binary.
//!
//! # Usage
//!
//! ```ignore
//! use kimiai::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => println!("{}", kimiai::cli::version_line()),
//!     CliCommand::Help => println!("{}", kimiai::cli::USAGE),
//!     CliCommand::Chat(args) => run_chat(args).await?,
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ArgsError, ChatArgs, CliCommand, USAGE};
pub use version::{version_line, VERSION};
