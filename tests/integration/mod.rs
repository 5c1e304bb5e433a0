//! Integration tests for the arbor summarization pipeline

mod cli_commands;
mod persistence_roundtrip;
mod pipeline;
mod support;
