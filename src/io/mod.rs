//! Image input and point cloud output.

mod bitmap;
mod dump;

pub use bitmap::{
    ImageConfig, ImageConverter, ImageLoader, InkPolarity, candidate_file_name,
    reference_file_name,
};
pub use dump::{write_comparison, write_point_cloud, write_points};
