pub mod grid_reader;
pub mod source;

pub use grid_reader::GridReader;
pub use source::DataSource;
