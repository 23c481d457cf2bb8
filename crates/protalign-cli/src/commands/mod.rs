pub mod net_viz;
pub mod on_chain;
pub mod on_set;
