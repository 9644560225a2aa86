//! # caddie-ingest
//!
//! Turns launch-monitor CSV exports into [`ShotSample`]s and keeps them in a
//! JSON shot library.
//!
//! The simulator's `Offline` column is sign-flipped here, once, so that every
//! consumer downstream sees right-of-target as negative.
//!
//! ```no_run
//! use std::path::Path;
//! use caddie_ingest::{LibraryStore, ParseOptions, read_csv_file};
//!
//! let batch = read_csv_file(Path::new("topgolf.csv"), None, ParseOptions::default())?;
//! let store = LibraryStore::new("shots.json");
//! let mut library = store.load()?;
//! library.merge(&batch.session, batch.shots);
//! store.save(&library)?;
//! # Ok::<(), caddie_ingest::IngestError>(())
//! ```
//!
//! [`ShotSample`]: caddie_core::shot::ShotSample

pub mod clubs;
mod error;
pub mod library;
pub mod parse;
pub mod store;

pub use error::IngestError;
pub use library::{MergePreview, ShotLibrary};
pub use parse::{ImportBatch, ParseOptions, SkippedRow, parse_csv, read_csv_file};
pub use store::LibraryStore;
