pub mod frame_preprocessor;
pub mod threshold_params;
