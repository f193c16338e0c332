//! Shared test utilities for pdh-db unit tests.
