pub mod decode;
pub mod discover;
pub mod fit;
pub mod model;
