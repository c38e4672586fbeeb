//! Test support: a scripted connection source with failure injection and an
//! operation log, so scope failure paths can be exercised without a
//! database. Enabled through the `test-utils` feature.

pub mod mock;

pub use mock::{FailureInjection, MockConnection, MockSource, OpLog};
