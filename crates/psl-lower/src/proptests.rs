//! Property-based tests for next-time unrolling.
