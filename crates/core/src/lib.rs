pub mod occupancy;
pub mod pipeline;
pub mod positions;
pub mod preprocessing;
pub mod shared;
pub mod video;
