//! Geographic bounding types.
//!
//! `GeoBounds` is the rectangle callers and viewports speak (corner pairs in
//! degrees, WGS84 axes), while `SeedArea` is the min/max-keyed convention the
//! tile store expects for bulk seeding.

/// A geographic rectangle in degrees.
///
/// Built from two opposite corners in any order; the constructor normalizes
/// them so `south() <= north()` and `west() <= east()` always hold.
///
/// # Example
///
/// ```
/// use cached_tile_layer::GeoBounds;
///
/// let bounds = GeoBounds::from_corners((4.0, 3.0), (1.0, 2.0));
/// assert_eq!(bounds.north(), 4.0);
/// assert_eq!(bounds.south(), 1.0);
/// assert_eq!(bounds.east(), 3.0);
/// assert_eq!(bounds.west(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl GeoBounds {
    /// Create bounds from two opposite `(latitude, longitude)` corners.
    pub fn from_corners(corner_a: (f64, f64), corner_b: (f64, f64)) -> Self {
        let (lat_a, lng_a) = corner_a;
        let (lat_b, lng_b) = corner_b;
        Self {
            north: lat_a.max(lat_b),
            south: lat_a.min(lat_b),
            east: lng_a.max(lng_b),
            west: lng_a.min(lng_b),
        }
    }

    /// Northernmost latitude.
    pub fn north(&self) -> f64 {
        self.north
    }

    /// Southernmost latitude.
    pub fn south(&self) -> f64 {
        self.south
    }

    /// Easternmost longitude.
    pub fn east(&self) -> f64 {
        self.east
    }

    /// Westernmost longitude.
    pub fn west(&self) -> f64 {
        self.west
    }
}

/// A bounding box in the tile store's min/max convention.
///
/// The store keys seed requests on explicit minima and maxima rather than
/// compass directions; `From<GeoBounds>` performs the mapping (north becomes
/// `max_lat`, east becomes `max_lng`, and so on).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedArea {
    /// Maximum latitude (north edge).
    pub max_lat: f64,
    /// Maximum longitude (east edge).
    pub max_lng: f64,
    /// Minimum latitude (south edge).
    pub min_lat: f64,
    /// Minimum longitude (west edge).
    pub min_lng: f64,
}

impl From<GeoBounds> for SeedArea {
    fn from(bounds: GeoBounds) -> Self {
        Self {
            max_lat: bounds.north(),
            max_lng: bounds.east(),
            min_lat: bounds.south(),
            min_lng: bounds.west(),
        }
    }
}

impl From<&GeoBounds> for SeedArea {
    fn from(bounds: &GeoBounds) -> Self {
        Self::from(*bounds)
    }
}
