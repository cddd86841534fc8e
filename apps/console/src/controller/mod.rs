//! Controller layer: page state transitions, error reporting, host side effects, and action dispatch.

pub mod dashboard;
pub mod events;
pub mod generator;
pub mod interaction;
pub mod orchestration;

#[cfg(test)]
#[path = "../tests/support.rs"]
pub(crate) mod test_support;
