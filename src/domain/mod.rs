pub mod car;
pub mod error;

pub use car::{Car, CarPatch};
pub use error::CarError;
