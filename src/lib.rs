//! Elementa - elemental journaling core
//!
//! Persists short reflections filed under one of five elements, runs
//! voice and audio capture sessions, and serves the per-element prompt and
//! presentation catalog.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Elements and their catalog, journal entries, the recording
//!   session state machine, configuration values and errors
//! - **Application**: Use cases (entry store, recording) and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (file storage, cpal capture, FLAC archive, config)
//! - **CLI**: Command-line interface, argument parsing and output

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod logging;
