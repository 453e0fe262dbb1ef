//! Query autocompletion from corpus statistics.
//!
//! This crate learns word frequencies and n-gram successor frequencies from a
//! text corpus and uses them to complete partially typed search queries:
//! - A vocabulary of recognized words, ranked by frequency
//! - Bigram, trigram and quadgram successor tables with backoff lookup
//! - A query expander building a multi-level, multi-branch suggestion list
//! - Persistence of the four tables as a consistent set
//!
//! Models are built (or loaded) once and are read-only afterwards, so a single
//! model can be shared by any number of request handlers.

/// Language model, builders, predictors and the query expander.
pub mod model;

/// Tokenization and recognized-word lookup.
pub mod text;

/// Error types for model loading and request validation.
pub mod error;

/// Corpus reading and file helpers.
pub mod io;
