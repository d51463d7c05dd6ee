pub mod postgres;

pub use postgres::PgOccupancyStore;
