pub mod gates;
pub mod noise;
pub mod observables;
pub mod register;
pub mod states;

pub use linalg::{Error, Result};
