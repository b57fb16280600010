pub mod binary_position_store;
