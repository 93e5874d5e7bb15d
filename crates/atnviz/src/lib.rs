#![forbid(unsafe_code)]

//! `atnviz` renders the augmented transition network (ATN) of an ANTLR-style grammar as
//! Graphviz DOT documents.
//!
//! The automaton is handed over as an [`AtnData`] snapshot (usually JSON exported by the
//! grammar toolchain), validated into an immutable [`Automaton`], and rendered into three
//! families of documents:
//!
//! - `clusters_for_<rule>.dot`: every rule as a cluster, trimmed relative to one focus rule
//! - `atn.dot`: the whole automaton as a flat graph
//! - `atn_<index>.dot`: the states of a single rule, undecorated
//!
//! ```
//! use atnviz::{Automaton, GenerateOptions, MemorySink, generate, write_documents};
//!
//! let json = r#"{
//!   "rule_names": ["expr"],
//!   "states": [
//!     { "id": 0, "rule_index": 0, "kind": "RuleStart", "transitions": [{ "target": 1, "epsilon": true }] },
//!     { "id": 1, "rule_index": 0, "kind": "RuleStop" }
//!   ]
//! }"#;
//! let atn = Automaton::from_json_str(json).unwrap();
//! let docs = generate(&atn, &GenerateOptions::default());
//! let mut sink = MemorySink::default();
//! write_documents(&docs, &mut sink).into_result().unwrap();
//! assert!(sink.get("atn.dot").unwrap().contains("state0 -> state1"));
//! ```

pub mod cluster;
pub mod color;
pub mod document;
pub mod dot;
pub mod inter;
pub mod model;
pub mod sink;

pub use color::{Rgb, UNOWNED_FILL, color_for_rule};
pub use document::{Document, DocumentKind, GenerateOptions, generate};
pub use model::{
    AtnData, Automaton, State, StateData, StateIndex, StateKind, Transition, TransitionData,
    Vocabulary,
};
pub use sink::{
    DirectorySink, DocumentFailure, DocumentSink, MemorySink, WriteReport, write_documents,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rule name `{name}` is declared more than once")]
    DuplicateRuleName { name: String },

    #[error("rule name `{name}` cannot be used in a document file name")]
    InvalidRuleName { name: String },

    #[error("duplicate state id {id}")]
    DuplicateStateId { id: u32 },

    #[error("state {state} has a transition to unknown state {target}")]
    UnknownTarget { state: u32, target: u32 },

    #[error("state {state} has rule index {rule_index}, but only {rule_count} rules are declared")]
    RuleIndexOutOfRange {
        state: u32,
        rule_index: i32,
        rule_count: usize,
    },

    #[error("ATN snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {} of {attempted} documents: {}", .failures.len(), DocumentFailure::names(.failures))]
    WriteFailures {
        attempted: usize,
        failures: Vec<DocumentFailure>,
    },
}
