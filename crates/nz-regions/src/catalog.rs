//! Read-only region and city lookup.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::coordinate::{Coordinate, haversine_km};
use crate::data::NEW_ZEALAND_REGIONS;
use crate::names::{fold_name, same_name};

/// A city or town belonging to exactly one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Display name, including macrons where they apply.
    pub name: &'static str,
    /// Approximate city centre.
    pub coordinate: Coordinate,
    /// Rounded urban-area population, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u32>,
    /// Whether this is the region's principal centre.
    pub is_main: bool,
}

/// A regional council area and its cities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Display name.
    pub name: &'static str,
    /// Three-letter short code.
    pub code: &'static str,
    /// Representative centre used when a region name is resolved to a point.
    pub center: Coordinate,
    /// Member cities in table order.
    pub cities: &'static [City],
}

impl Region {
    /// Return the region's principal city, if the table marks one.
    #[must_use]
    pub fn main_city(&self) -> Option<&'static City> {
        self.cities.iter().find(|city| city.is_main)
    }

    /// Return whether `city_name` belongs to this region.
    #[must_use]
    pub fn contains_city(&self, city_name: &str) -> bool {
        self.cities.iter().any(|city| same_name(city.name, city_name))
    }
}

/// Lookup facade over a static region table.
#[derive(Debug, Clone, Copy)]
pub struct RegionCatalog {
    regions: &'static [Region],
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::new_zealand()
    }
}

impl RegionCatalog {
    /// Catalogue backed by the compiled-in New Zealand table.
    #[must_use]
    pub const fn new_zealand() -> Self {
        Self::from_regions(NEW_ZEALAND_REGIONS)
    }

    /// Catalogue backed by an arbitrary static table.
    #[must_use]
    pub const fn from_regions(regions: &'static [Region]) -> Self {
        Self { regions }
    }

    /// All regions in table order.
    #[must_use]
    pub const fn list_regions(&self) -> &'static [Region] {
        self.regions
    }

    /// Iterate every city in table order.
    pub fn all_cities(&self) -> impl Iterator<Item = &'static City> + use<> {
        self.regions.iter().flat_map(|region| region.cities.iter())
    }

    /// Look up a region by name or short code.
    #[must_use]
    pub fn region(&self, name_or_code: &str) -> Option<&'static Region> {
        self.regions.iter().find(|region| {
            same_name(region.name, name_or_code) || same_name(region.code, name_or_code)
        })
    }

    /// Member cities of `region_name`; empty for unknown regions.
    #[must_use]
    pub fn cities_of(&self, region_name: &str) -> &'static [City] {
        self.region(region_name).map_or(&[], |region| region.cities)
    }

    /// Look up a city by name.
    #[must_use]
    pub fn city(&self, name: &str) -> Option<&'static City> {
        self.all_cities().find(|city| same_name(city.name, name))
    }

    /// The region owning `city_name`.
    #[must_use]
    pub fn region_of(&self, city_name: &str) -> Option<&'static Region> {
        self.regions
            .iter()
            .find(|region| region.contains_city(city_name))
    }

    /// Resolve a city name to its coordinate, falling back to a region's
    /// centre.
    #[must_use]
    pub fn coordinate_of(&self, name: &str) -> Option<Coordinate> {
        self.city(name)
            .map(|city| city.coordinate)
            .or_else(|| self.region(name).map(|region| region.center))
    }

    /// Nearest known city among `candidates`.
    ///
    /// Unknown candidate names are skipped. Equal distances resolve to the
    /// alphabetically first city name so the result never depends on input
    /// order.
    pub fn nearest_city<I, S>(&self, point: Coordinate, candidates: I) -> Option<&'static City>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolved = candidates
            .into_iter()
            .filter_map(|name| self.city(name.as_ref()));
        nearest_of(point, resolved)
    }

    /// Nearest city over the whole catalogue.
    #[must_use]
    pub fn nearest_city_overall(&self, point: Coordinate) -> Option<&'static City> {
        nearest_of(point, self.all_cities())
    }

    /// Expand region names into member cities.
    ///
    /// Region names (or codes) become their cities in table order, known
    /// city names are canonicalised, and unknown names pass through trimmed.
    /// The result is de-duplicated, keeping first-seen order.
    pub fn expand<I, S>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut expanded = Vec::new();
        let mut push = |name: &str| {
            if seen.insert(fold_name(name)) {
                expanded.push(name.to_owned());
            }
        };

        for raw in names {
            let raw = raw.as_ref();
            if raw.trim().is_empty() {
                continue;
            }
            if let Some(region) = self.region(raw) {
                for city in region.cities {
                    push(city.name);
                }
            } else if let Some(city) = self.city(raw) {
                push(city.name);
            } else {
                push(raw.trim());
            }
        }
        expanded
    }
}

fn nearest_of(
    point: Coordinate,
    cities: impl Iterator<Item = &'static City>,
) -> Option<&'static City> {
    cities
        .map(|city| (haversine_km(point, city.coordinate), city))
        .min_by(|(left_km, left), (right_km, right)| {
            left_km
                .total_cmp(right_km)
                .then_with(|| compare_names(left.name, right.name))
        })
        .map(|(_, city)| city)
}

fn compare_names(left: &str, right: &str) -> Ordering {
    fold_name(left).cmp(&fold_name(right))
}

#[cfg(test)]
mod tests {
    //! Lookup, proximity, and expansion behaviour.

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> RegionCatalog {
        RegionCatalog::new_zealand()
    }

    const TWIN_REGIONS: &[Region] = &[Region {
        name: "Twinland",
        code: "TWN",
        center: Coordinate::new(0.0, 0.0),
        cities: &[
            City {
                name: "Zeta",
                coordinate: Coordinate::new(0.0, 1.0),
                population: None,
                is_main: true,
            },
            City {
                name: "Alpha",
                coordinate: Coordinate::new(0.0, -1.0),
                population: None,
                is_main: false,
            },
        ],
    }];

    #[rstest]
    fn every_city_belongs_to_its_region(catalog: RegionCatalog) {
        for city in catalog.all_cities() {
            let region = catalog.region_of(city.name).expect("city has a region");
            assert!(
                catalog
                    .cities_of(region.name)
                    .iter()
                    .any(|member| member.name == city.name),
                "{} missing from {}",
                city.name,
                region.name
            );
        }
    }

    #[rstest]
    fn single_candidate_is_always_nearest(catalog: RegionCatalog) {
        let far_away = Coordinate::new(51.5, -0.12);
        for city in catalog.all_cities() {
            let nearest = catalog
                .nearest_city(far_away, [city.name])
                .expect("single candidate resolves");
            assert_eq!(nearest.name, city.name);
        }
    }

    #[rstest]
    fn nearest_city_picks_closest_candidate(catalog: RegionCatalog) {
        let lyttelton = Coordinate::new(-43.6031, 172.7190);
        let nearest = catalog
            .nearest_city(lyttelton, ["Dunedin", "Christchurch", "Timaru"])
            .expect("candidates resolve");
        assert_eq!(nearest.name, "Christchurch");
    }

    #[rstest]
    fn nearest_city_skips_unknown_candidates(catalog: RegionCatalog) {
        let point = Coordinate::new(-41.29, 174.78);
        assert!(catalog.nearest_city(point, ["Atlantis"]).is_none());
        let nearest = catalog
            .nearest_city(point, ["Atlantis", "Nelson"])
            .expect("known candidate resolves");
        assert_eq!(nearest.name, "Nelson");
    }

    #[rstest]
    fn equidistant_candidates_resolve_alphabetically() {
        let catalog = RegionCatalog::from_regions(TWIN_REGIONS);
        let origin = Coordinate::new(0.0, 0.0);
        for order in [["Zeta", "Alpha"], ["Alpha", "Zeta"]] {
            let nearest = catalog.nearest_city(origin, order).expect("resolves");
            assert_eq!(nearest.name, "Alpha");
        }
    }

    #[rstest]
    fn nearest_overall_finds_local_city(catalog: RegionCatalog) {
        let near_queenstown = Coordinate::new(-45.03, 168.66);
        let nearest = catalog
            .nearest_city_overall(near_queenstown)
            .expect("catalogue is non-empty");
        assert_eq!(nearest.name, "Queenstown");
    }

    #[rstest]
    #[case("Christchurch", Some((-43.5321, 172.6362)))]
    #[case("West Coast", Some((-42.4504, 171.2108)))]
    #[case("taupo", Some((-38.6857, 176.0702)))]
    #[case("Atlantis", None)]
    fn coordinate_of_resolves_cities_then_regions(
        catalog: RegionCatalog,
        #[case] name: &str,
        #[case] expected: Option<(f64, f64)>,
    ) {
        let resolved = catalog
            .coordinate_of(name)
            .map(|c| (c.latitude, c.longitude));
        assert_eq!(resolved, expected);
    }

    #[rstest]
    fn unknown_names_return_empty_results(catalog: RegionCatalog) {
        assert!(catalog.cities_of("Atlantis").is_empty());
        assert!(catalog.region_of("Atlantis").is_none());
        assert!(catalog.city("").is_none());
    }

    #[rstest]
    fn region_lookup_accepts_codes(catalog: RegionCatalog) {
        let region = catalog.region("can").expect("code resolves");
        assert_eq!(region.name, "Canterbury");
        assert_eq!(
            region.main_city().map(|city| city.name),
            Some("Christchurch")
        );
    }

    #[rstest]
    fn expand_replaces_regions_with_cities(catalog: RegionCatalog) {
        let expanded = catalog.expand(["Canterbury"]);
        assert_eq!(
            expanded,
            vec!["Christchurch", "Timaru", "Ashburton", "Rangiora", "Kaikōura"]
        );
    }

    #[rstest]
    fn expand_deduplicates_preserving_first_seen_order(catalog: RegionCatalog) {
        let expanded = catalog.expand(["timaru", "Nelson", "Canterbury", "  ", "Atlantis"]);
        assert_eq!(
            expanded,
            vec![
                "Timaru",
                "Nelson",
                "Christchurch",
                "Ashburton",
                "Rangiora",
                "Kaikōura",
                "Atlantis",
            ]
        );
    }
}
