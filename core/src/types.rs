//! Domain types for the beer catalog.
//!
//! The store treats [`Beer`] as mostly opaque: identity, display name, and
//! ABV are the only fields the pipeline interprets. Everything else is
//! carried through for display.

use serde::{Deserialize, Serialize};

/// Number of items requested per catalog page.
pub const PAGE_SIZE: u32 = 25;

/// Unique identifier for a catalog item, assigned by the upstream catalog.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BeerId(u64);

impl BeerId {
    /// Creates a `BeerId` from a raw catalog id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw catalog id
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single catalog item.
///
/// Produced by the gateway (deserialized from the upstream payload) or the
/// favorites store; the catalog store never mutates one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Beer {
    /// Stable unique identifier
    pub id: BeerId,
    /// Display name
    pub name: String,
    /// Short marketing line
    #[serde(default)]
    pub tagline: Option<String>,
    /// First brewed date as reported upstream (free-form, e.g. "04/2007")
    #[serde(default)]
    pub first_brewed: Option<String>,
    /// Long description
    #[serde(default)]
    pub description: Option<String>,
    /// Alcohol by volume; absent for some prototype entries
    #[serde(default)]
    pub abv: Option<f64>,
    /// International bitterness units
    #[serde(default)]
    pub ibu: Option<f64>,
    /// Label image URL
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Which data source feeds the display pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The paginated upstream catalog
    #[default]
    Remote,
    /// The locally persisted favorites collection
    Favorites,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Favorites => write!(f, "favorites"),
        }
    }
}

/// An inclusive ABV window; either bound may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AbvRange {
    /// Inclusive lower bound
    pub min: Option<f64>,
    /// Inclusive upper bound
    pub max: Option<f64>,
}

impl AbvRange {
    /// A range with both ends open (matches everything).
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    /// Creates a range from optional bounds
    #[must_use]
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// True when at least one bound is set
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Whether an item with the given ABV passes this range.
    ///
    /// An item without an ABV cannot satisfy a numeric bound, so it is
    /// rejected whenever either bound is set.
    #[must_use]
    pub fn admits(&self, abv: Option<f64>) -> bool {
        if !self.is_bounded() {
            return true;
        }
        let Some(abv) = abv else {
            return false;
        };
        self.min.is_none_or(|min| abv >= min) && self.max.is_none_or(|max| abv <= max)
    }
}

/// Field the display list is ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Keep the order items arrived in (server-defined for remote mode)
    #[default]
    Natural,
    /// Case-insensitive name ordering
    Name,
    /// Numeric ABV ordering; items without an ABV always sort last
    Abv,
}

/// Direction applied to the non-natural sort keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

/// A sort key plus direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to order by
    pub key: SortKey,
    /// Direction; ignored for [`SortKey::Natural`]
    pub direction: SortDirection,
}

impl SortSpec {
    /// The default ordering: natural
    #[must_use]
    pub const fn natural() -> Self {
        Self {
            key: SortKey::Natural,
            direction: SortDirection::Asc,
        }
    }

    /// Order by name in the given direction
    #[must_use]
    pub const fn by_name(direction: SortDirection) -> Self {
        Self {
            key: SortKey::Name,
            direction,
        }
    }

    /// Order by ABV in the given direction
    #[must_use]
    pub const fn by_abv(direction: SortDirection) -> Self {
        Self {
            key: SortKey::Abv,
            direction,
        }
    }
}

/// Parameters for one gateway query.
///
/// Built fresh from store state immediately before each request and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryParams {
    /// 1-based page number
    pub page: u32,
    /// Items per page; the store always requests [`PAGE_SIZE`]
    pub page_size: u32,
    /// Name substring filter, already trimmed; `None` when blank
    pub name_contains: Option<String>,
    /// Inclusive lower ABV bound
    pub abv_min: Option<f64>,
    /// Inclusive upper ABV bound
    pub abv_max: Option<f64>,
}
