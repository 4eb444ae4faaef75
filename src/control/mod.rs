pub mod atmosphere;
pub mod body;
pub mod environment;
pub mod parts;
pub mod spacecraft;
