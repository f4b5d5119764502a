//! Trait catalogs - immutable lookup tables of named variants
//!
//! Every trait a character can select (body type, material, hair style, ...)
//! is an entry in a [`Catalog`]. Lookups never fail: an unknown id resolves
//! to the catalog's designated default entry.
//!
//! The full set of catalogs is built once per process and shared through
//! [`catalogs()`].

mod entries;
mod tables;

use std::sync::LazyLock;

pub use entries::{
    Accessory, AgeRange, BodyType, EyeStyle, HairDepth, HairPiece, HairShape, HairStyle,
    Hand, HandItem, HeadShape, Headwear, Jewelry, Material, MouthStyle, NoseStyle, PatternKind,
    PatternSpec, PieceFill, PieceShape, Placement, Rim, TorsoSilhouette, Texture, VariantPiece,
};

/// Common access to catalog entries.
pub trait CatalogEntry {
    /// Stable identifier stored in character data
    fn id(&self) -> &str;
    /// Human readable label
    fn name(&self) -> &str;
}

/// An immutable table of entries with a designated default.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    label: &'static str,
    entries: Vec<T>,
    default_index: usize,
}

impl<T: CatalogEntry> Catalog<T> {
    /// Create a catalog whose default is its first entry.
    ///
    /// # Panics
    ///
    /// Panics if `entries` is empty; every catalog needs a default.
    pub fn new(label: &'static str, entries: Vec<T>) -> Self {
        assert!(!entries.is_empty(), "catalog '{}' has no entries", label);
        Self { label, entries, default_index: 0 }
    }

    /// Create a catalog with an explicitly marked default entry.
    ///
    /// An id that is not in `entries` leaves the first entry as default.
    pub fn with_default(label: &'static str, entries: Vec<T>, default_id: &str) -> Self {
        let mut catalog = Self::new(label, entries);
        if let Some(index) = catalog.entries.iter().position(|e| e.id() == default_id) {
            catalog.default_index = index;
        }
        catalog
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id())
    }

    pub fn default_entry(&self) -> &T {
        &self.entries[self.default_index]
    }

    /// Exact lookup, `None` if the id is unknown.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Find-or-default lookup.
    ///
    /// ```
    /// use toonkit::catalog::{catalogs, CatalogEntry};
    ///
    /// let materials = &catalogs().materials;
    /// assert_eq!(materials.lookup("glossy").id(), "glossy");
    /// assert_eq!(materials.lookup("retired-material").id(), "matte");
    /// ```
    pub fn lookup(&self, id: &str) -> &T {
        match self.get(id) {
            Some(entry) => entry,
            None => {
                let fallback = self.default_entry();
                tracing::debug!(
                    catalog = self.label,
                    requested = id,
                    fallback = fallback.id(),
                    "unknown catalog id, using default entry"
                );
                fallback
            }
        }
    }

    /// Like [`lookup`](Self::lookup), also reporting whether the default was used.
    pub fn resolve(&self, id: &str) -> (&T, bool) {
        match self.get(id) {
            Some(entry) => (entry, false),
            None => (self.lookup(id), true),
        }
    }
}

/// Every catalog the compositor reads.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub body_types: Catalog<BodyType>,
    pub age_ranges: Catalog<AgeRange>,
    pub materials: Catalog<Material>,
    pub textures: Catalog<Texture>,
    pub hair_styles: Catalog<HairStyle>,
    pub hair_shapes: Catalog<HairShape>,
    pub head_shapes: Catalog<HeadShape>,
    pub eye_styles: Catalog<EyeStyle>,
    pub nose_styles: Catalog<NoseStyle>,
    pub mouth_styles: Catalog<MouthStyle>,
    pub headwear: Catalog<Headwear>,
    pub accessories: Catalog<Accessory>,
    pub jewelry: Catalog<Jewelry>,
    pub hand_items: Catalog<HandItem>,
}

impl Catalogs {
    /// Build the canonical catalog set.
    pub fn standard() -> Self {
        tables::standard()
    }

    /// `(label, ids)` for every catalog, in a stable order.
    pub fn listing(&self) -> Vec<(&'static str, Vec<&str>)> {
        fn row<T: CatalogEntry>(c: &Catalog<T>) -> (&'static str, Vec<&str>) {
            (c.label(), c.ids().collect())
        }
        vec![
            row(&self.body_types),
            row(&self.age_ranges),
            row(&self.materials),
            row(&self.textures),
            row(&self.hair_styles),
            row(&self.hair_shapes),
            row(&self.head_shapes),
            row(&self.eye_styles),
            row(&self.nose_styles),
            row(&self.mouth_styles),
            row(&self.headwear),
            row(&self.accessories),
            row(&self.jewelry),
            row(&self.hand_items),
        ]
    }

    /// `(id, name)` pairs of the catalog with the given label.
    pub fn describe(&self, label: &str) -> Option<Vec<(String, String)>> {
        fn rows<T: CatalogEntry>(c: &Catalog<T>) -> Vec<(String, String)> {
            c.entries().iter().map(|e| (e.id().to_string(), e.name().to_string())).collect()
        }
        let rows = match label {
            "body_types" => rows(&self.body_types),
            "age_ranges" => rows(&self.age_ranges),
            "materials" => rows(&self.materials),
            "textures" => rows(&self.textures),
            "hair_styles" => rows(&self.hair_styles),
            "hair_shapes" => rows(&self.hair_shapes),
            "head_shapes" => rows(&self.head_shapes),
            "eye_styles" => rows(&self.eye_styles),
            "nose_styles" => rows(&self.nose_styles),
            "mouth_styles" => rows(&self.mouth_styles),
            "headwear" => rows(&self.headwear),
            "accessories" => rows(&self.accessories),
            "jewelry" => rows(&self.jewelry),
            "hand_items" => rows(&self.hand_items),
            _ => return None,
        };
        Some(rows)
    }
}

static CATALOGS: LazyLock<Catalogs> = LazyLock::new(Catalogs::standard);

/// The process-wide catalog set, built on first use.
pub fn catalogs() -> &'static Catalogs {
    &CATALOGS
}
