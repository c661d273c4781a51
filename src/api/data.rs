//! The data structures returned by the nekos.best API.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

/// The media kind of a category, and of every result it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Format {
    /// A static image, sourced from an artist.
    Image = 0,
    /// An animated clip, sourced from an anime.
    Animation = 1,
}

impl Format {
    /// The value of the `type` query parameter of the search endpoint.
    ///
    /// The API counts from `1`: `Image => 1`, `Animation => 2`.
    pub fn code(self) -> u8 {
        self as u8 + 1
    }

    /// `"png"` is the only format the API reports for images.
    fn from_wire(format: &str) -> Self {
        if format == "png" {
            Self::Image
        } else {
            Self::Animation
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => f.write_str("image"),
            Self::Animation => f.write_str("animation"),
        }
    }
}

/// A named partition of the corpus, e.g. `neko` or `kiss`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// The name of the category, which is also its path on the API. Never empty.
    pub name: String,
    /// Whether this category serves images or animations.
    pub format: Format,
}

impl Category {
    /// Describe a category without asking the API, e.g. when the name is already known.
    pub fn new(name: impl Into<String>, format: Format) -> Self {
        Self {
            name: name.into(),
            format,
        }
    }
}

/// The value of each entry of the `endpoints` response.
#[derive(Deserialize)]
struct CategoryInner {
    format: String,
}

/// All the categories exposed by the API, in the order the server sent them.
///
/// The order is not a contract of the API, use [`Self::find`] to look a category up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryList(Vec<Category>);

impl CategoryList {
    /// Look a category up by its name.
    pub fn find(&self, name: &str) -> Option<&Category> {
        self.0.iter().find(|category| category.name == name)
    }

    /// The number of categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the API exposes no category at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the categories in server order.
    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.0.iter()
    }
}

impl IntoIterator for CategoryList {
    type Item = Category;
    type IntoIter = std::vec::IntoIter<Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CategoryList {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Category>> for CategoryList {
    fn from(value: Vec<Category>) -> Self {
        Self(value)
    }
}

/// The `endpoints` response is a map from category name to its descriptor,
/// so the list is built entry by entry to keep the server order.
impl<'de> Deserialize<'de> for CategoryList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CategoryListVisitor;

        impl<'de> Visitor<'de> for CategoryListVisitor {
            type Value = CategoryList;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category names to category descriptors")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut categories = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, inner)) = map.next_entry::<String, CategoryInner>()? {
                    if name.is_empty() {
                        return Err(de::Error::invalid_value(
                            Unexpected::Str(&name),
                            &"a non-empty category name",
                        ));
                    }
                    categories.push(Category {
                        name,
                        format: Format::from_wire(&inner.format),
                    });
                }
                Ok(CategoryList(categories))
            }
        }

        deserializer.deserialize_map(CategoryListVisitor)
    }
}

/// Where an animation comes from.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnimationSource {
    /// The anime the clip is taken from.
    pub anime_name: String,
}

/// Who made an image, and where it was published.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageSource {
    /// The name of the artist.
    pub artist_name: String,
    /// A link to the artist's page.
    pub artist_href: String,
    /// A link to the original post.
    pub source_url: String,
}

/// The source metadata of a [`Media`], one variant per [`Format`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum Source {
    /// The metadata of a [`Format::Image`] result.
    Image(ImageSource),
    /// The metadata of a [`Format::Animation`] result.
    Animation(AnimationSource),
}

impl Source {
    /// The format this metadata belongs to.
    pub fn format(&self) -> Format {
        match self {
            Self::Image(_) => Format::Image,
            Self::Animation(_) => Format::Animation,
        }
    }
}

/// A single result of a category fetch or a search.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Media {
    /// The URL of the file, which can be passed to [`crate::api::NekosClient::download`].
    pub url: String,
    /// The source metadata, matching the format of the request that produced it.
    #[serde(flatten)]
    pub source: Source,
}

impl Media {
    /// The format of this result, always the one of its [`Self::source`].
    pub fn format(&self) -> Format {
        self.source.format()
    }
}
