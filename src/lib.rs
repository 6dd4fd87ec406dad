pub mod objson;
pub mod sync;
pub mod url;
