//! forensic: a DNA profile store.
//!
//! Profiles are kept in an unbalanced binary search tree keyed by full name
//! ("Last, First"). Each profile lists short tandem repeats (STRs) with an
//! expected occurrence count; flagging compares those counts against two
//! unknown reference sequences and marks the profiles of interest.
//!
//! Layers:
//! - [`domain`]: entities, the BST engine and the data-file parser (no I/O)
//! - [`application`]: services that load data files and run the analysis
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
