//! Test utilities for feed client tests.
//!
//! This module provides a scripted transport and a recording limiter.

pub mod mock_transport;

#[allow(unused_imports)]
pub use mock_transport::{
    Event, EventLog, MockResponse, MockTransport, RecordingLimiter, page_json,
};
