//! Library side of the `rowguard` binary: logging setup and the job runner
//! that ties template loading, row reading, validation and reporting together.

pub mod job;
pub mod logging;
