//! Test harnesses

mod session_runner;

pub use session_runner::{SessionHarness, SessionOutput, TEST_SERVER_NAME, TEST_SERVER_VERSION};
