/**
 * This module contains all logic for reading and decoding external files.
 */
pub mod texture;

pub use texture::{DecodedImage, decode_image, load_binary};
