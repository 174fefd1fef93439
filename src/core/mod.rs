pub mod adapter;
pub mod normalize;
pub mod public_read;
