//! Testing utilities and harness for Dragkit

pub mod recording;
pub mod robot;
pub mod robot_assertions;


pub use recording::{ContractCall, RecordingDelegate};
pub use robot::*;

pub mod prelude {
    pub use crate::recording::{ContractCall, RecordingDelegate};
    pub use crate::robot::*;
    pub use crate::robot_assertions;
}
