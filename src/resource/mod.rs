//! Texture resources applied to scene leaves.

pub use crate::resource::texture_manager::{
    check_format, Texture, TextureError, TextureManager, SUPPORTED_EXTENSIONS,
};

mod texture_manager;
