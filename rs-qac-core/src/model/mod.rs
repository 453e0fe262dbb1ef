//! Word-level language model and query expansion.
//!
//! This module provides:
//! - Frequency-ranked vocabulary and prefix completion (`Vocabulary`)
//! - Fixed-order successor tables (`NGramTable`)
//! - The assembled model with backoff prediction (`LanguageModel`)
//! - Multi-level query expansion (`QueryExpander`)
//! - Request parameters and work limits (`SuggestRequest`, `Limits`)

/// High-level interface turning a partial query into a list of suggestions.
pub mod expander;

/// Vocabulary plus bigram, trigram and quadgram tables.
///
/// Supports parallel construction from a corpus, persistence, next-word
/// prediction and last-word completion.
pub mod language_model;

/// Fixed-order successor table (`n >= 2`).
pub mod ngram_model;

/// Ranked successor list of a single context.
pub mod successors;

/// Frequency table of recognized words.
pub mod vocabulary;

/// Client request parameters and their validation.
pub mod request;

/// On-disk layout of the four model tables.
pub mod persistence;

/// Parallel corpus counting.
mod builder;
