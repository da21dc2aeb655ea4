//! A resource manager to load textures.

use image::{self, DynamicImage, GenericImageView};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// File extensions accepted as textures, lowercase.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Error raised while loading a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file content could not be decoded.
    #[error("image decoding error: {0}")]
    Image(#[from] image::ImageError),

    /// The file extension is not one of [`SUPPORTED_EXTENSIONS`].
    #[error("unsupported texture format: {0}")]
    UnsupportedFormat(String),
}

/// Checks that `path` has a supported texture extension.
pub fn check_format(path: &Path) -> Result<(), TextureError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(TextureError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Decoded RGBA8 texture data.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    /// Texture dimensions (width, height).
    pub size: (u32, u32),
    data: Vec<u8>,
    source: Option<PathBuf>,
}

impl Texture {
    /// The RGBA8 pixels, row by row.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The file this texture was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn from_image(image: &DynamicImage, source: Option<PathBuf>) -> Texture {
        let (width, height) = image.dimensions();

        Texture {
            size: (width, height),
            data: image.to_rgba8().into_raw(),
            source,
        }
    }
}

/// The texture manager.
///
/// It keeps a cache of already-loaded textures, and can load new textures.
pub struct TextureManager {
    textures: HashMap<String, Arc<Texture>>,
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureManager {
    /// Creates a new texture manager.
    pub fn new() -> TextureManager {
        TextureManager {
            textures: HashMap::new(),
        }
    }

    /// Get a texture with the specified name. Returns `None` if the texture is not registered.
    pub fn get(&self, name: &str) -> Option<Arc<Texture>> {
        self.textures.get(name).cloned()
    }

    /// Whether a texture is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    /// Registers a texture decoded from a `DynamicImage` object.
    ///
    /// If a texture with same name exists, nothing is created and the old texture is returned.
    pub fn add_image(&mut self, image: DynamicImage, name: &str) -> Arc<Texture> {
        self.textures
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Texture::from_image(&image, None)))
            .clone()
    }

    /// Registers a texture decoded from an encoded byte array.
    ///
    /// If a texture with same name exists, nothing is decoded and the old texture is returned.
    pub fn add_image_from_memory(
        &mut self,
        image_data: &[u8],
        name: &str,
    ) -> Result<Arc<Texture>, TextureError> {
        if let Some(texture) = self.get(name) {
            return Ok(texture);
        }

        let image = image::load_from_memory(image_data)?;
        Ok(self.add_image(image, name))
    }

    /// Loads a texture from a file and registers it under `name`.
    ///
    /// If a texture with same name exists, nothing is loaded and the old texture is returned.
    ///
    /// # Errors
    /// Fails if the extension is not supported, the file cannot be read, or its
    /// content cannot be decoded.
    pub fn add(&mut self, path: &Path, name: &str) -> Result<Arc<Texture>, TextureError> {
        if let Some(texture) = self.get(name) {
            return Ok(texture);
        }

        let texture = Arc::new(Self::load_texture_from_file(path)?);
        let _ = self.textures.insert(name.to_string(), texture.clone());
        log::debug!("Loaded texture {:?} ({}x{}).", path, texture.size.0, texture.size.1);

        Ok(texture)
    }

    /// Loads a texture from a file, using its path as name.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Texture>, TextureError> {
        self.add(path, &path.to_string_lossy())
    }

    /// Forgets the texture registered under `name`.
    pub fn remove(&mut self, name: &str) -> Option<Arc<Texture>> {
        self.textures.remove(name)
    }

    fn load_texture_from_file(path: &Path) -> Result<Texture, TextureError> {
        check_format(path)?;

        let bytes = std::fs::read(path)?;
        let image = image::load_from_memory(&bytes)?;

        Ok(Texture::from_image(&image, Some(path.to_path_buf())))
    }
}
