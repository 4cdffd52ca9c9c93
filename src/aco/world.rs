//! City set and pairwise distances.
//!
//! A [`World`] is loaded once and never resized. Distances are cached in a
//! row-major `n × n` table on construction.

/// A named city with planar coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// Display name.
    pub name: String,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl City {
    /// Creates a city.
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Fixed city list with its cached distance table.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::World;
///
/// let world = World::from_coordinates(&[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)]);
/// assert_eq!(world.len(), 3);
/// assert!((world.distance(1, 2) - 5.0).abs() < 1e-12);
/// assert!((world.tour_length(&[0, 1, 2]) - 12.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct World {
    cities: Vec<City>,
    distances: Vec<f64>,
}

impl World {
    /// Builds a world from an ordered city list.
    ///
    /// Duplicate coordinates are accepted here; they surface as
    /// [`AcoError::DegenerateGeometry`](super::AcoError::DegenerateGeometry)
    /// once an ant or a deposit meets the zero-length edge.
    pub fn new(cities: Vec<City>) -> Self {
        let distances = distance_table(&cities);
        Self { cities, distances }
    }

    /// Builds a world from bare coordinates, naming cities `City 0`, `City 1`, ...
    pub fn from_coordinates(coords: &[(f64, f64)]) -> Self {
        let cities = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| City::new(format!("City {i}"), x, y))
            .collect();
        Self::new(cities)
    }

    /// The built-in 12-city seed set of European capitals.
    pub fn default_cities() -> Vec<City> {
        vec![
            City::new("Warszawa", 52.2297, 21.0122),
            City::new("Berlin", 52.52, 13.405),
            City::new("Praga", 50.0755, 14.4378),
            City::new("Wiedeń", 48.2082, 16.3738),
            City::new("Bratysława", 48.1486, 17.1077),
            City::new("Budapeszt", 47.4979, 19.0402),
            City::new("Bukareszt", 44.4268, 26.1025),
            City::new("Sofia", 42.6977, 23.3219),
            City::new("Ateny", 37.9838, 23.7275),
            City::new("Zagrzeb", 45.815, 15.9819),
            City::new("Ljubljana", 46.0569, 14.5058),
            City::new("Rzym", 41.9028, 12.4964),
        ]
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Whether the world has no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Read-only view of the cities, in load order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// The city at `index`, if any.
    pub fn city(&self, index: usize) -> Option<&City> {
        self.cities.get(index)
    }

    /// Euclidean distance between cities `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.cities.len() + j]
    }

    /// Total cyclic length of a tour, closing edge included.
    ///
    /// Tours with fewer than two cities have length zero.
    ///
    /// # Panics
    ///
    /// Panics if any index in `tour` is out of range.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        match (tour.first(), tour.last()) {
            (Some(&first), Some(&last)) if tour.len() > 1 => {
                let open: f64 = tour.windows(2).map(|w| self.distance(w[0], w[1])).sum();
                open + self.distance(last, first)
            }
            _ => 0.0,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Self::default_cities())
    }
}

fn distance_table(cities: &[City]) -> Vec<f64> {
    let n = cities.len();
    let row = |i: usize| -> Vec<f64> {
        (0..n)
            .map(|j| if i == j { 0.0 } else { cities[i].distance_to(&cities[j]) })
            .collect()
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..n).into_par_iter().flat_map_iter(row).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..n).flat_map(row).collect()
    }
}
