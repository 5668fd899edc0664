//! Controller layer: pure reducer, derived view, and the async driver that
//! connects them to a backend.

pub mod events;
pub mod orchestration;
pub mod reducer;
pub mod view;
