//! Document models for the three collections.

pub mod goal;
pub mod task;
pub mod user;

pub use goal::*;
pub use task::*;
pub use user::*;
