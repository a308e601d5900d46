pub mod car_store;
pub mod memory;
pub mod postgres;

pub use car_store::CarStore;
pub use memory::InMemoryCarStore;
pub use postgres::PostgresCarStore;
