//! Static catalogue of New Zealand regions and cities.
//!
//! The catalogue is compiled in and never mutated. It answers three kinds of
//! question used by alert aggregation:
//!
//! - lookup: which region owns a city, what coordinate a name resolves to;
//! - proximity: which candidate city lies nearest a coordinate;
//! - expansion: turning a mixed list of region and city names into a
//!   de-duplicated city list.
//!
//! Unknown names never raise errors; lookups return `None` or an empty slice.
//!
//! # Example
//!
//! ```
//! use nz_regions::{Coordinate, RegionCatalog};
//!
//! let catalog = RegionCatalog::new_zealand();
//! let region = catalog.region_of("Christchurch").expect("known city");
//! assert_eq!(region.code, "CAN");
//!
//! let expanded = catalog.expand(["Canterbury"]);
//! assert!(expanded.iter().any(|city| city == "Christchurch"));
//!
//! let near_wellington = Coordinate::new(-41.29, 174.78);
//! let nearest = catalog
//!     .nearest_city(near_wellington, ["Auckland", "Wellington"])
//!     .expect("candidates resolve");
//! assert_eq!(nearest.name, "Wellington");
//! ```

mod catalog;
mod coordinate;
mod data;
mod names;

pub use catalog::{City, Region, RegionCatalog};
pub use coordinate::{Coordinate, EARTH_RADIUS_KM, haversine_km};
pub use data::NEW_ZEALAND_REGIONS;
pub use names::fold_name;
