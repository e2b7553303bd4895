//! Image resources consumed by the game engines.
//!
//! The puzzle slices one shared image by tile position; the memotest shows
//! one image per pair. Engines only need an ordered, integer-indexable
//! sequence of descriptors; that contract is the `ImageProvider` trait.
//! `ImageCatalog` is the bundled implementation with by-id lookup and a
//! stock photo set for demos.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A single image resource: stable id plus a renderable URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Stable identifier (photo id in the stock catalog).
    pub id: String,

    /// URL the view layer renders.
    pub url: String,
}

impl ImageDescriptor {
    /// Create a new descriptor.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// Ordered sequence of image descriptors, indexable by integer.
///
/// Engines state their minimum length up front: the puzzle needs at least
/// one entry, the memotest at least one per pair. A shorter provider is a
/// configuration error reported by the engine constructor.
pub trait ImageProvider {
    /// Number of descriptors available.
    fn len(&self) -> usize;

    /// Check whether the provider is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the descriptor at `index`, if any.
    fn get(&self, index: usize) -> Option<&ImageDescriptor>;
}

impl ImageProvider for [ImageDescriptor] {
    fn len(&self) -> usize {
        <[ImageDescriptor]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&ImageDescriptor> {
        <[ImageDescriptor]>::get(self, index)
    }
}

impl ImageProvider for Vec<ImageDescriptor> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&ImageDescriptor> {
        self.as_slice().get(index)
    }
}

/// Catalog of image descriptors with by-id lookup.
///
/// ## Example
///
/// ```
/// use tile_games::core::{ImageCatalog, ImageDescriptor, ImageProvider};
///
/// let mut catalog = ImageCatalog::new();
/// catalog.register(ImageDescriptor::new("cat", "https://example.com/cat.jpg"));
///
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.find("cat").unwrap().url, "https://example.com/cat.jpg");
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ImageCatalog {
    images: Vec<ImageDescriptor>,
    by_id: FxHashMap<String, usize>,
}

impl ImageCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor to the catalog.
    ///
    /// Panics if a descriptor with the same id is already registered.
    pub fn register(&mut self, image: ImageDescriptor) {
        if self.by_id.contains_key(&image.id) {
            panic!("Image with id {:?} already registered", image.id);
        }
        self.by_id.insert(image.id.clone(), self.images.len());
        self.images.push(image);
    }

    /// Look up a descriptor by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&ImageDescriptor> {
        self.by_id.get(id).map(|&index| &self.images[index])
    }

    /// Iterate descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageDescriptor> {
        self.images.iter()
    }

    /// The bundled stock photo set.
    ///
    /// Eight entries: enough for a 4x4 memotest board (eight pairs), with
    /// the first entry doubling as the puzzle's shared image.
    #[must_use]
    pub fn stock() -> Self {
        let entries = [
            (
                "file-1635810851773",
                "https://images.unsplash.com/file-1635810851773-3defff69fe00image",
            ),
            (
                "photo-1518791841217",
                "https://images.unsplash.com/photo-1518791841217-8f162f1e1131?w=200",
            ),
            (
                "photo-1548199973-03cce0bbc87b",
                "https://images.unsplash.com/photo-1548199973-03cce0bbc87b?w=200",
            ),
            (
                "photo-1425082661705",
                "https://images.unsplash.com/photo-1425082661705-1834bfd09dca?w=200",
            ),
            (
                "photo-1452570053594",
                "https://images.unsplash.com/photo-1452570053594-1b985d6ea890?w=200",
            ),
            (
                "photo-1474511320723",
                "https://images.unsplash.com/photo-1474511320723-9a56873867b5?w=200",
            ),
            (
                "photo-1441974231531",
                "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=200",
            ),
            (
                "photo-1465146344425",
                "https://images.unsplash.com/photo-1465146344425-f00d5f5c8f07?w=200",
            ),
        ];

        let mut catalog = Self::new();
        for (id, url) in entries {
            catalog.register(ImageDescriptor::new(id, url));
        }
        catalog
    }
}

impl ImageProvider for ImageCatalog {
    fn len(&self) -> usize {
        self.images.len()
    }

    fn get(&self, index: usize) -> Option<&ImageDescriptor> {
        self.images.get(index)
    }
}

impl FromIterator<ImageDescriptor> for ImageCatalog {
    fn from_iter<I: IntoIterator<Item = ImageDescriptor>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for image in iter {
            catalog.register(image);
        }
        catalog
    }
}
