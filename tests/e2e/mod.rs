//! End-to-end tests for packcheck
//!
//! Each test builds a throwaway pack directory tree, runs the checker
//! against it with an in-memory sink, and asserts on the diagnostics
//! and the scan summary.

mod references;
