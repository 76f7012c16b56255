pub mod alphabet;
pub mod codec;
pub mod config;
pub mod registry;
pub mod variants;
