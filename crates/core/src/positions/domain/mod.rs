pub mod position;
pub mod position_store;
