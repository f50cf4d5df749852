//! Cross-crate integration tests for the gotobank tools. See `tests/`.
