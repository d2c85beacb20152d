//! `DataReader` and `DataWriter` traits for the primitive types carried by
//! the Server List Ping packets

pub mod reader;
pub mod writer;

pub use reader::*;
pub use writer::*;
