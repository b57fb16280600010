pub mod constants;
pub mod frame;
pub mod mask;
pub mod reference_image;
pub mod video_metadata;
