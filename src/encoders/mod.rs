pub mod chunked;
pub mod errors;
pub mod sizing;
