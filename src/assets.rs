pub mod decode;
pub mod layer;
