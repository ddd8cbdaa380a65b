#![allow(dead_code)]

// tests/common/mod.rs

// Logging is auto-installed for every test binary that declares `mod common`
#[ctor::ctor]
fn init_logging() {
    authgate_test_support::logging::init();
}

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";
pub const SEED_EMAIL: &str = "user@email.com";
pub const SEED_PASSWORD: &str = "password";
