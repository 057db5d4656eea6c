//! Compiled-in New Zealand regional council areas and their cities.
//!
//! Coordinates are approximate city centres. Populations are rounded
//! urban-area estimates and only recorded for the larger centres.

use crate::catalog::{City, Region};
use crate::coordinate::Coordinate;

const fn city(name: &'static str, latitude: f64, longitude: f64) -> City {
    City {
        name,
        coordinate: Coordinate::new(latitude, longitude),
        population: None,
        is_main: false,
    }
}

const fn main_city(name: &'static str, latitude: f64, longitude: f64, population: u32) -> City {
    City {
        name,
        coordinate: Coordinate::new(latitude, longitude),
        population: Some(population),
        is_main: true,
    }
}

const fn town(name: &'static str, latitude: f64, longitude: f64, population: u32) -> City {
    City {
        name,
        coordinate: Coordinate::new(latitude, longitude),
        population: Some(population),
        is_main: false,
    }
}

/// All sixteen regions, north to south.
pub const NEW_ZEALAND_REGIONS: &[Region] = &[
    Region {
        name: "Northland",
        code: "NTL",
        center: Coordinate::new(-35.5795, 173.7624),
        cities: &[
            main_city("Whangārei", -35.7251, 174.3237, 54_400),
            town("Kerikeri", -35.2268, 173.9474, 7_500),
            city("Kaitaia", -35.1146, 173.2628),
            city("Dargaville", -35.9405, 173.8697),
        ],
    },
    Region {
        name: "Auckland",
        code: "AUK",
        center: Coordinate::new(-36.8485, 174.7633),
        cities: &[
            main_city("Auckland", -36.8485, 174.7633, 1_695_000),
            town("Manukau", -36.9928, 174.8799, 375_000),
            town("North Shore", -36.8000, 174.7500, 250_000),
            city("Waitākere", -36.8490, 174.5430),
            city("Pukekohe", -37.2000, 174.9000),
        ],
    },
    Region {
        name: "Waikato",
        code: "WKO",
        center: Coordinate::new(-37.6191, 175.3000),
        cities: &[
            main_city("Hamilton", -37.7870, 175.2793, 185_300),
            town("Taupō", -38.6857, 176.0702, 26_000),
            town("Cambridge", -37.8833, 175.4667, 21_000),
            city("Te Awamutu", -38.0083, 175.3234),
            city("Thames", -37.1383, 175.5405),
        ],
    },
    Region {
        name: "Bay of Plenty",
        code: "BOP",
        center: Coordinate::new(-38.0000, 176.7500),
        cities: &[
            main_city("Tauranga", -37.6878, 176.1651, 155_200),
            town("Rotorua", -38.1368, 176.2497, 77_800),
            town("Whakatāne", -37.9533, 176.9908, 21_300),
        ],
    },
    Region {
        name: "Gisborne",
        code: "GIS",
        center: Coordinate::new(-38.4000, 177.9000),
        cities: &[main_city("Gisborne", -38.6623, 178.0176, 37_700)],
    },
    Region {
        name: "Hawke's Bay",
        code: "HKB",
        center: Coordinate::new(-39.5000, 176.7000),
        cities: &[
            main_city("Napier", -39.4928, 176.9120, 66_000),
            town("Hastings", -39.6381, 176.8492, 50_000),
            city("Waipukurau", -39.9942, 176.5556),
        ],
    },
    Region {
        name: "Taranaki",
        code: "TKI",
        center: Coordinate::new(-39.3000, 174.3000),
        cities: &[
            main_city("New Plymouth", -39.0556, 174.0752, 59_300),
            town("Hāwera", -39.5916, 174.2836, 9_800),
            city("Stratford", -39.3380, 174.2840),
        ],
    },
    Region {
        name: "Manawatū-Whanganui",
        code: "MWT",
        center: Coordinate::new(-39.7000, 175.6000),
        cities: &[
            main_city("Palmerston North", -40.3523, 175.6082, 90_400),
            town("Whanganui", -39.9301, 175.0479, 42_100),
            city("Levin", -40.6218, 175.2866),
            city("Feilding", -40.2254, 175.5656),
        ],
    },
    Region {
        name: "Wellington",
        code: "WGN",
        center: Coordinate::new(-41.0000, 175.4000),
        cities: &[
            main_city("Wellington", -41.2865, 174.7762, 215_400),
            town("Lower Hutt", -41.2092, 174.9081, 112_000),
            town("Porirua", -41.1339, 174.8406, 60_000),
            town("Upper Hutt", -41.1244, 175.0708, 46_000),
            city("Masterton", -40.9597, 175.6575),
        ],
    },
    Region {
        name: "Tasman",
        code: "TAS",
        center: Coordinate::new(-41.4570, 172.8200),
        cities: &[
            main_city("Richmond", -41.3387, 173.1851, 16_000),
            city("Motueka", -41.1203, 173.0122),
            city("Tākaka", -40.8570, 172.8060),
        ],
    },
    Region {
        name: "Nelson",
        code: "NSN",
        center: Coordinate::new(-41.2706, 173.2840),
        cities: &[main_city("Nelson", -41.2706, 173.2840, 54_600)],
    },
    Region {
        name: "Marlborough",
        code: "MBH",
        center: Coordinate::new(-41.5727, 173.4217),
        cities: &[
            main_city("Blenheim", -41.5134, 173.9612, 28_000),
            city("Picton", -41.2906, 174.0001),
        ],
    },
    Region {
        name: "West Coast",
        code: "WTC",
        center: Coordinate::new(-42.4504, 171.2108),
        cities: &[
            main_city("Greymouth", -42.4504, 171.2108, 8_200),
            city("Westport", -41.7545, 171.6035),
            city("Hokitika", -42.7167, 170.9667),
        ],
    },
    Region {
        name: "Canterbury",
        code: "CAN",
        center: Coordinate::new(-43.5000, 171.7000),
        cities: &[
            main_city("Christchurch", -43.5321, 172.6362, 389_300),
            town("Timaru", -44.3969, 171.2536, 29_000),
            town("Ashburton", -43.9033, 171.7444, 21_000),
            town("Rangiora", -43.3044, 172.5930, 19_000),
            city("Kaikōura", -42.4008, 173.6814),
        ],
    },
    Region {
        name: "Otago",
        code: "OTA",
        center: Coordinate::new(-45.0000, 169.8000),
        cities: &[
            main_city("Dunedin", -45.8788, 170.5028, 134_100),
            town("Queenstown", -45.0312, 168.6626, 29_000),
            town("Oamaru", -45.0975, 170.9704, 14_000),
            city("Wānaka", -44.7032, 169.1321),
        ],
    },
    Region {
        name: "Southland",
        code: "STL",
        center: Coordinate::new(-45.9000, 168.0000),
        cities: &[
            main_city("Invercargill", -46.4132, 168.3538, 57_100),
            city("Gore", -46.0988, 168.9458),
            city("Te Anau", -45.4144, 167.7180),
        ],
    },
];

#[cfg(test)]
mod tests {
    //! Table integrity checks.

    use std::collections::HashSet;

    use super::*;
    use crate::names::fold_name;

    #[test]
    fn lists_all_sixteen_regions() {
        assert_eq!(NEW_ZEALAND_REGIONS.len(), 16);
    }

    #[test]
    fn city_names_are_unique_across_regions() {
        let mut seen = HashSet::new();
        for region in NEW_ZEALAND_REGIONS {
            for city in region.cities {
                assert!(
                    seen.insert(fold_name(city.name)),
                    "duplicate city name {}",
                    city.name
                );
            }
        }
    }

    #[test]
    fn every_region_has_exactly_one_main_city() {
        for region in NEW_ZEALAND_REGIONS {
            let mains = region.cities.iter().filter(|city| city.is_main).count();
            assert_eq!(mains, 1, "{} should have one main city", region.name);
        }
    }

    #[test]
    fn every_coordinate_lies_inside_new_zealand() {
        for region in NEW_ZEALAND_REGIONS {
            for coordinate in
                std::iter::once(region.center).chain(region.cities.iter().map(|c| c.coordinate))
            {
                assert!(coordinate.is_valid());
                assert!((-47.5..=-34.0).contains(&coordinate.latitude));
                assert!((166.0..=179.0).contains(&coordinate.longitude));
            }
        }
    }

    #[test]
    fn region_names_do_not_collide_with_other_regions_cities() {
        let region_keys: HashSet<_> = NEW_ZEALAND_REGIONS
            .iter()
            .map(|region| fold_name(region.name))
            .collect();
        for region in NEW_ZEALAND_REGIONS {
            for city in region.cities {
                let key = fold_name(city.name);
                if region_keys.contains(&key) {
                    assert_eq!(
                        fold_name(region.name),
                        key,
                        "city {} shares a name with a different region",
                        city.name
                    );
                }
            }
        }
    }
}
