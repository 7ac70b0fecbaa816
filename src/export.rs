pub mod batch;
pub mod encode;
pub mod quality;
