//! Tests for service wiring and the capability seams
