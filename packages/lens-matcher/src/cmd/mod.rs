//! Subcommand implementations. Each `run` takes the search service so the
//! binary wires in GitHub and tests wire in the mock.

pub mod names;
pub mod search;
