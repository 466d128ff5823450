// tests/common/fixtures.rs

//! Test fixtures for CLI integration tests.

pub const BASIC_ENV: &str = "APP_NAME=MyApp\nDEBUG=false\nEMPTY_VAR=\nGREETING=\"Hello, World!\"\n";

pub const EXPANSION_ENV: &str =
    "BASE=https://example.com\nAPI=${BASE}/api\nFALLBACK=${MISSING:-8080}\n";
