//! Command-line surface of the `alerts` binary.

use std::pin::pin;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use nz_regions::Coordinate;
use serde::Serialize;
use serde_json::{Value, json};

use alerts::app::AlertsApp;
use alerts::domain::{CancelHandle, HazardKind, HazardToggles, ReportCategory, ReportDraft};

/// `alerts` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "alerts",
    about = "Earthquake, road and weather alerts for New Zealand cities",
    version
)]
pub struct CliArgs {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List every region.
    Regions,
    /// List the cities of one region.
    Cities {
        /// Region name or short code.
        region: String,
    },
    /// Find the catalogue city nearest a point.
    Nearest {
        /// Latitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees.
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Restrict the search to these cities.
        #[arg(long = "candidate", value_name = "city")]
        candidates: Vec<String>,
    },
    /// List stored subscriptions.
    Subscriptions,
    /// Subscribe to a city or region.
    Subscribe {
        /// City or region name.
        location: String,
        /// Hazards to leave disabled.
        #[arg(long = "without", value_name = "hazard")]
        without: Vec<HazardKind>,
    },
    /// Remove a subscription.
    Unsubscribe {
        /// Subscription id.
        id: String,
    },
    /// Flip one hazard on a subscription.
    Toggle {
        /// Subscription id.
        id: String,
        /// Hazard to flip.
        hazard: HazardKind,
    },
    /// Record a mock sign-in.
    SignIn {
        /// Email address.
        email: String,
    },
    /// Clear the current session.
    SignOut,
    /// Show the current session.
    Whoami,
    /// Submit a community report.
    Report {
        /// City the report concerns.
        #[arg(long)]
        city: String,
        /// Report category.
        #[arg(long, value_parser = parse_category)]
        category: ReportCategory,
        /// Short title.
        #[arg(long)]
        title: String,
        /// Longer description.
        #[arg(long)]
        description: String,
    },
    /// List community reports, optionally for some cities only.
    Reports {
        /// Cities to include.
        #[arg(long = "city", value_name = "city")]
        cities: Vec<String>,
    },
    /// Fetch alerts for every stored subscription.
    Alerts {
        /// Discard cached feed data first.
        #[arg(long)]
        refresh: bool,
        /// Abandon the fetch after this many seconds.
        #[arg(long = "deadline-secs", value_name = "seconds")]
        deadline_secs: Option<u64>,
    },
}

fn parse_category(raw: &str) -> Result<ReportCategory, String> {
    let normalised = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(Value::String(normalised)).map_err(|_| {
        format!(
            "unknown report category '{raw}'; expected flooding, fire, power_outage, \
             road_hazard, landslide, or other"
        )
    })
}

fn to_json(value: &impl Serialize) -> Result<Value> {
    serde_json::to_value(value).wrap_err("failed to serialise output")
}

/// Run `command` against `app`, returning the JSON to print.
///
/// # Errors
///
/// Returns the domain error, wrapped, when the operation fails.
pub async fn execute(app: &AlertsApp, command: Command) -> Result<Value> {
    match command {
        Command::Regions => to_json(&app.catalog.list_regions()),
        Command::Cities { region } => {
            let found = app
                .catalog
                .region(&region)
                .ok_or_else(|| eyre!("unknown region '{region}'"))?;
            to_json(&found.cities)
        }
        Command::Nearest {
            lat,
            lng,
            candidates,
        } => {
            let point = Coordinate::new(lat, lng);
            if !point.is_valid() {
                return Err(eyre!("coordinate {lat},{lng} is out of range"));
            }
            let nearest = if candidates.is_empty() {
                app.catalog.nearest_city_overall(point)
            } else {
                app.catalog.nearest_city(point, &candidates)
            };
            Ok(nearest.map_or(Value::Null, |city| {
                json!({
                    "city": city,
                    "distanceKm": city.coordinate.distance_km(&point),
                })
            }))
        }
        Command::Subscriptions => to_json(&app.subscriptions.list()?),
        Command::Subscribe { location, without } => {
            let hazards = HazardToggles::all().without(&without);
            to_json(&app.subscriptions.subscribe(&location, hazards)?)
        }
        Command::Unsubscribe { id } => to_json(&app.subscriptions.unsubscribe(&id)?),
        Command::Toggle { id, hazard } => to_json(&app.subscriptions.toggle(&id, hazard)?),
        Command::SignIn { email } => to_json(&app.sessions.sign_in(&email)?),
        Command::SignOut => {
            app.sessions.sign_out()?;
            Ok(json!({ "signedOut": true }))
        }
        Command::Whoami => to_json(&app.sessions.current()?),
        Command::Report {
            city,
            category,
            title,
            description,
        } => to_json(&app.reports.submit(ReportDraft {
            category,
            title,
            description,
            city,
        })?),
        Command::Reports { cities } => {
            if cities.is_empty() {
                to_json(&app.reports.list()?)
            } else {
                to_json(&app.reports.list_for(&cities)?)
            }
        }
        Command::Alerts {
            refresh,
            deadline_secs,
        } => {
            if refresh {
                app.aggregator.refresh();
            }
            let subscriptions = app.subscriptions.list()?;
            let (handle, token) = CancelHandle::pair();
            let deadline = deadline_secs.map_or(Duration::MAX, Duration::from_secs);
            let mut fetch = pin!(app.aggregator.get_alerts(&subscriptions, &token));
            let digest = tokio::select! {
                biased;
                digest = &mut fetch => digest,
                () = tokio::time::sleep(deadline) => {
                    handle.cancel();
                    fetch.await
                }
            }
            .wrap_err("alert fetch abandoned")?;
            to_json(&digest)
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for argument parsing and command dispatch.

    use super::*;
    use std::sync::Arc;

    use alerts::app::FeedSources;
    use alerts::config::AlertsSettings;
    use alerts::domain::{QuakeAlert, RoadAlert, WeatherAlert};
    use alerts::outbound::storage::InMemoryKeyValueStore;
    use alerts::test_support::{MutableClock, ScriptedFeedSource};
    use chrono::{TimeZone, Utc};
    use nz_regions::RegionCatalog;
    use rstest::{fixture, rstest};

    fn parse(args: &[&str]) -> Command {
        CliArgs::try_parse_from(args).expect("arguments parse").command
    }

    #[fixture]
    fn app() -> AlertsApp {
        let clock = Arc::new(MutableClock::new(
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
                .single()
                .expect("valid start time"),
        ));
        let sources = FeedSources {
            quakes: Arc::new(ScriptedFeedSource::<QuakeAlert>::new("geonet", [])),
            roads: Arc::new(ScriptedFeedSource::<RoadAlert>::new("nzta", [])),
            weather: Arc::new(ScriptedFeedSource::<WeatherAlert>::new("metservice", [])),
        };
        let settings = AlertsSettings {
            geonet_endpoint: None,
            nzta_endpoint: None,
            metservice_endpoint: None,
            request_timeout_secs: None,
            cache_ttl_secs: None,
            data_dir: None,
            fallback_seed: Some(7),
            quake_radius_km: None,
            min_mmi: None,
            user_agent: None,
        };
        AlertsApp::assemble(
            &settings,
            RegionCatalog::new_zealand(),
            Arc::new(InMemoryKeyValueStore::default()),
            sources,
            clock,
        )
    }

    #[rstest]
    fn subscribe_collects_disabled_hazards() {
        let command = parse(&[
            "alerts",
            "subscribe",
            "Wellington",
            "--without",
            "quake",
            "--without",
            "road",
        ]);
        assert_eq!(
            command,
            Command::Subscribe {
                location: "Wellington".to_owned(),
                without: vec![HazardKind::Quake, HazardKind::Road],
            }
        );
    }

    #[rstest]
    fn nearest_accepts_negative_latitudes() {
        let command = parse(&["alerts", "nearest", "--lat", "-41.29", "--lng", "174.78"]);
        assert!(matches!(command, Command::Nearest { lat, .. } if lat < 0.0));
    }

    #[rstest]
    #[case("power-outage", ReportCategory::PowerOutage)]
    #[case("Flooding", ReportCategory::Flooding)]
    fn categories_parse_loosely(#[case] raw: &str, #[case] expected: ReportCategory) {
        assert_eq!(parse_category(raw), Ok(expected));
    }

    #[rstest]
    fn unknown_categories_are_rejected() {
        let error = parse_category("meteor").expect_err("unknown category");
        assert!(error.contains("unknown report category"));
    }

    #[rstest]
    fn toggle_rejects_unknown_hazards() {
        assert!(CliArgs::try_parse_from(["alerts", "toggle", "1", "tsunami"]).is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn subscribe_then_list_round_trips(app: AlertsApp) {
        execute(
            &app,
            Command::Subscribe {
                location: "Nelson".to_owned(),
                without: vec![HazardKind::Weather],
            },
        )
        .await
        .expect("subscribe");
        let listed = execute(&app, Command::Subscriptions).await.expect("list");
        assert_eq!(listed.pointer("/0/location"), Some(&json!("Nelson")));
    }

    #[rstest]
    #[tokio::test]
    async fn alerts_fall_back_when_sources_are_exhausted(app: AlertsApp) {
        app.subscriptions
            .subscribe("Christchurch", HazardToggles::all())
            .expect("subscribe");
        let digest = execute(
            &app,
            Command::Alerts {
                refresh: false,
                deadline_secs: None,
            },
        )
        .await
        .expect("alerts");
        assert_eq!(
            digest.pointer("/roads/origin/kind"),
            Some(&json!("fallback"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_regions_are_reported(app: AlertsApp) {
        let error = execute(
            &app,
            Command::Cities {
                region: "Atlantis".to_owned(),
            },
        )
        .await
        .expect_err("unknown region");
        assert!(error.to_string().contains("unknown region"));
    }
}
