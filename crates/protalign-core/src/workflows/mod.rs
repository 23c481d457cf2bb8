pub mod chain;
pub mod network;
pub mod set;
