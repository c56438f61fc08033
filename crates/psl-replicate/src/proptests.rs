//! Property-based tests for replicator expansion.
