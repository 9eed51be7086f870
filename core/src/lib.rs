//! In-memory inverted index built by parallel workers and queried with
//! conjunctive term search.

pub mod corpus;
pub mod error;
pub mod index;
pub mod query;
pub mod scheduler;
pub mod tokenizer;

pub use corpus::{Document, FileDocument, TextDocument};
pub use error::{Error, Result};
pub use index::{DocId, InvertedIndex, PostingList};
pub use query::{search, search_str};
pub use scheduler::{build, partition, FailureReporter, LogReporter, MAX_WORKERS};
