//! # Wordlist Tools
//!
//! Two small text utilities sharing one crate.
//!
//! ## Features
//!
//! - **Dictionary filter** (`filter-dic`): strip non-letters from every line of
//!   a word list, lowercase it and keep words within an inclusive length range
//! - **Arrangement tables** (`table`): print every rows × columns grid a text
//!   fits into exactly, with ASCII borders
//!
//! ## Usage
//!
//! ```bash
//! # Words of 3 to 8 letters from words_alpha.txt into words_beta.txt
//! filter-dic
//!
//! # Custom range and files
//! filter-dic 4 6 dictionary.txt short.txt
//!
//! # All grids for two texts
//! table "hi there" "ab cd"
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wordlist_tools::processor::filter_dictionary;
//! use wordlist_tools::table::{arrange_all, render};
//!
//! let count = filter_dictionary(Path::new("words_alpha.txt"), Path::new("words_beta.txt"), 3, 8)?;
//! println!("{count}");
//!
//! for (dims, grid) in arrange_all("ab cd").tables {
//!     println!("{dims} Table:\n{}", render(&grid));
//! }
//! # Ok::<(), wordlist_tools::Error>(())
//! ```

pub mod cli;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod output;
pub mod processor;
pub mod progress;
pub mod table;

pub use cli::{FilterArgs, TableArgs};
pub use error::{Error, Result};
pub use processor::{filter_dictionary, Processor, ProcessorConfig};
