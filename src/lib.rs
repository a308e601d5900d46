pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::CarService;
pub use domain::{Car, CarError, CarPatch};
pub use storage::{CarStore, InMemoryCarStore, PostgresCarStore};
