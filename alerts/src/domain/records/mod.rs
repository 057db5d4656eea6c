//! Alert records produced by the hazard feeds and local reports.
//!
//! Feed records are ephemeral: they are fetched or generated per request and
//! never persisted. Community reports are the one record kind stored
//! locally.

mod community;
mod quake;
mod road;
mod weather;

pub use community::{CommunityReport, ReportCategory, ReportDraft};
pub use quake::{QuakeAlert, QuakeSeverity};
pub use road::{RoadAlert, RoadEventKind, RoadStatus};
pub use weather::{WarningLevel, WeatherAlert};
