//! Cross-module tests.

mod property;
