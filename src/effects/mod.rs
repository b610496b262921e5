pub mod decay;
pub mod flash;
pub mod shake;
