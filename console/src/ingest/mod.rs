pub mod csv_batch;

pub use csv_batch::load_batch;
