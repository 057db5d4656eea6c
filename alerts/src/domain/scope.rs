//! City scopes and per-record scope filtering.

use std::collections::HashSet;

use nz_regions::{City, Coordinate, RegionCatalog, fold_name};

use super::hazard::HazardKind;
use super::records::{QuakeAlert, RoadAlert, WeatherAlert};

/// Default radius within which a quake is attributed to a scope city.
pub const DEFAULT_QUAKE_RADIUS_KM: f64 = 100.0;

/// The de-duplicated set of cities (and their regions) one feed call serves.
#[derive(Debug, Clone)]
pub struct AlertScope {
    catalog: RegionCatalog,
    cities: Vec<String>,
    city_keys: HashSet<String>,
    regions: Vec<&'static str>,
    region_keys: HashSet<String>,
    quake_radius_km: f64,
}

impl AlertScope {
    /// Build a scope from already-expanded city names.
    ///
    /// Names are de-duplicated (case and macron insensitive) keeping their
    /// first-seen order; known names are canonicalised. Region names are not
    /// expanded here: callers decide whether a name is a region or a city.
    pub fn new<I, S>(catalog: RegionCatalog, cities: I, quake_radius_km: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut city_keys = HashSet::new();
        let mut ordered = Vec::new();
        for raw in cities {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            let canonical = catalog.city(raw).map_or(raw, |city| city.name);
            if city_keys.insert(fold_name(canonical)) {
                ordered.push(canonical.to_owned());
            }
        }

        let mut region_keys = HashSet::new();
        let mut regions = Vec::new();
        for city in &ordered {
            if let Some(region) = catalog.region_of(city) {
                if region_keys.insert(fold_name(region.name)) {
                    regions.push(region.name);
                }
            }
        }

        Self {
            catalog,
            cities: ordered,
            city_keys,
            regions,
            region_keys,
            quake_radius_km,
        }
    }

    /// Whether the scope names no cities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Canonical city names in first-seen order.
    #[must_use]
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Regions owning at least one scope city, in first-seen order.
    #[must_use]
    pub fn regions(&self) -> &[&'static str] {
        &self.regions
    }

    /// Scope cities the catalogue can locate.
    pub fn known_cities(&self) -> impl Iterator<Item = &'static City> + '_ {
        self.cities.iter().filter_map(|name| self.catalog.city(name))
    }

    /// Catalogue backing this scope.
    #[must_use]
    pub const fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    /// Attribution radius for quakes.
    #[must_use]
    pub const fn quake_radius_km(&self) -> f64 {
        self.quake_radius_km
    }

    /// Whether `city` is in scope.
    #[must_use]
    pub fn contains_city(&self, city: &str) -> bool {
        self.city_keys.contains(&fold_name(city))
    }

    /// Whether `region` owns at least one scope city.
    #[must_use]
    pub fn covers_region(&self, region: &str) -> bool {
        let key = self
            .catalog
            .region(region)
            .map_or_else(|| fold_name(region), |known| fold_name(known.name));
        self.region_keys.contains(&key)
    }

    /// Nearest locatable scope city to `point` and its distance in km.
    #[must_use]
    pub fn nearest(&self, point: Coordinate) -> Option<(&'static City, f64)> {
        self.catalog
            .nearest_city(point, &self.cities)
            .map(|city| (city, city.coordinate.distance_km(&point)))
    }
}

/// A feed record that can be filtered (and attributed) against a scope.
pub trait ScopedRecord: Clone + Send + Sync + 'static {
    /// Hazard this record kind belongs to.
    const KIND: HazardKind;

    /// Keep the record when it concerns `scope`, attributing it as needed.
    fn scoped(self, scope: &AlertScope) -> Option<Self>;
}

impl ScopedRecord for QuakeAlert {
    const KIND: HazardKind = HazardKind::Quake;

    fn scoped(mut self, scope: &AlertScope) -> Option<Self> {
        let (city, distance_km) = scope.nearest(self.coordinate)?;
        if distance_km > scope.quake_radius_km() {
            return None;
        }
        self.nearest_city = Some(city.name.to_owned());
        self.distance_km = Some((distance_km * 10.0).round() / 10.0);
        Some(self)
    }
}

impl ScopedRecord for RoadAlert {
    const KIND: HazardKind = HazardKind::Road;

    fn scoped(self, scope: &AlertScope) -> Option<Self> {
        let in_scope = match (&self.city, &self.region) {
            (Some(city), _) => scope.contains_city(city),
            (None, Some(region)) => scope.covers_region(region),
            (None, None) => false,
        };
        in_scope.then_some(self)
    }
}

impl ScopedRecord for WeatherAlert {
    const KIND: HazardKind = HazardKind::Weather;

    fn scoped(self, scope: &AlertScope) -> Option<Self> {
        self.regions
            .iter()
            .any(|region| scope.covers_region(region))
            .then_some(self)
    }
}
