//! Integration tests for manifest functionality
//!
//! These tests run the complete build-then-write pipeline against real
//! directories and check the written document.
