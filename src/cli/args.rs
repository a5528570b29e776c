//! Command-line argument parsing for the kimiai demo.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;

use thiserror::Error;

/// Prompt used when none is given on the command line
pub const DEFAULT_PROMPT: &str = "Hello, Kimi! Can you tell me a joke about programming?";

/// Prompt used when a file is attached and no prompt is given
pub const DEFAULT_FILE_PROMPT: &str =
    "Please summarize the content of the document I've just uploaded.";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Create a chat and stream one answer (default)
    Chat(ChatArgs),
}

/// Options for a chat run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatArgs {
    pub cookies: PathBuf,
    pub file: Option<PathBuf>,
    pub use_search: bool,
    /// Explicit prompt, if one was given
    pub prompt: Option<String>,
}

impl Default for ChatArgs {
    fn default() -> Self {
        Self {
            cookies: PathBuf::from("cookies.txt"),
            file: None,
            use_search: true,
            prompt: None,
        }
    }
}

impl ChatArgs {
    /// The prompt to send: explicit, else a default matching the run.
    pub fn prompt(&self) -> &str {
        match (&self.prompt, &self.file) {
            (Some(prompt), _) => prompt,
            (None, Some(_)) => DEFAULT_FILE_PROMPT,
            (None, None) => DEFAULT_PROMPT,
        }
    }
}

/// Errors from argument parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    #[error("Option '{0}' requires a value")]
    MissingValue(String),
    #[error("Unknown option '{0}'")]
    UnknownOption(String),
}

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: kimiai [OPTIONS] [PROMPT]...

Options:
  -c, --cookies <PATH>  Netscape cookie file with kimi-auth [default: cookies.txt]
  -f, --file <PATH>     Upload a file and reference it in the prompt
      --no-search       Do not let Kimi search the web
  -V, --version         Print version
  -h, --help            Print help";

/// Parse command-line arguments and return the appropriate command.
///
/// The first item is the program name and is skipped. Words that are not
/// options are joined into the prompt.
///
/// # Examples
///
/// ```
/// use kimiai::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["kimiai".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut chat = ChatArgs::default();
    let mut words: Vec<String> = Vec::new();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--cookies" | "-c" => {
                chat.cookies = args.next().map(PathBuf::from).ok_or(ArgsError::MissingValue(arg))?;
            }
            "--file" | "-f" => {
                chat.file = Some(args.next().map(PathBuf::from).ok_or(ArgsError::MissingValue(arg))?);
            }
            "--no-search" => chat.use_search = false,
            "--" => {
                words.extend(args.by_ref());
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(ArgsError::UnknownOption(arg));
            }
            _ => words.push(arg),
        }
    }

    if !words.is_empty() {
        chat.prompt = Some(words.join(" "));
    }
    Ok(CliCommand::Chat(chat))
}
