//! Community hazard reports kept in the local store.

use std::collections::HashSet;
use std::sync::Arc;

use mockable::Clock;
use nz_regions::{RegionCatalog, fold_name};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::error::DomainError;
use super::local_state::{load_json, save_json};
use super::ports::{KeyValueStore, REPORTS_KEY};
use super::records::{CommunityReport, ReportDraft};
use super::session_service::SessionService;

/// Longest accepted report title, in characters.
pub const MAX_TITLE_CHARS: usize = 120;
/// Longest accepted report description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Submit and list community reports.
#[derive(Clone)]
pub struct CommunityReportService {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    catalog: RegionCatalog,
    sessions: SessionService,
}

impl CommunityReportService {
    /// Build the service; the reporter is read from `sessions`.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        catalog: RegionCatalog,
        sessions: SessionService,
    ) -> Self {
        Self {
            store,
            clock,
            catalog,
            sessions,
        }
    }

    /// Validate and store a new report.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error for an empty or oversized title or
    /// description, or a city the catalogue does not know.
    pub fn submit(&self, draft: ReportDraft) -> Result<CommunityReport, DomainError> {
        let title = bounded_text("title", &draft.title, MAX_TITLE_CHARS)?;
        let description = bounded_text("description", &draft.description, MAX_DESCRIPTION_CHARS)?;
        let city = self.catalog.city(&draft.city).ok_or_else(|| {
            DomainError::invalid_request(format!("unknown city: {}", draft.city.trim()))
                .with_details(json!({ "field": "city" }))
        })?;
        let reporter = self.sessions.current()?.map(|session| session.email);

        let report = CommunityReport {
            id: Uuid::new_v4(),
            category: draft.category,
            title,
            description,
            city: city.name.to_owned(),
            coordinate: city.coordinate,
            reporter,
            created_at: self.clock.utc(),
        };

        let mut reports = self.load()?;
        reports.push(report.clone());
        save_json(self.store.as_ref(), REPORTS_KEY, &reports)?;
        info!(
            id = %report.id,
            city = %report.city,
            category = ?report.category,
            "report submitted"
        );
        Ok(report)
    }

    /// Every stored report, newest first.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the store fails or holds corrupt data.
    pub fn list(&self) -> Result<Vec<CommunityReport>, DomainError> {
        let mut reports = self.load()?;
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    /// Reports for any of `cities`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the store fails or holds corrupt data.
    pub fn list_for<S: AsRef<str>>(
        &self,
        cities: &[S],
    ) -> Result<Vec<CommunityReport>, DomainError> {
        let wanted: HashSet<String> = cities.iter().map(|city| fold_name(city.as_ref())).collect();
        let mut reports = self.list()?;
        reports.retain(|report| wanted.contains(&fold_name(&report.city)));
        Ok(reports)
    }

    fn load(&self) -> Result<Vec<CommunityReport>, DomainError> {
        Ok(load_json(self.store.as_ref(), REPORTS_KEY)?.unwrap_or_default())
    }
}

fn bounded_text(field: &str, raw: &str, max_chars: usize) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();
    if length == 0 || length > max_chars {
        return Err(DomainError::invalid_request(format!(
            "{field} must be between 1 and {max_chars} characters"
        ))
        .with_details(json!({ "field": field, "length": length })));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    //! Report validation and city filtering.

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::records::ReportCategory;
    use crate::outbound::storage::InMemoryKeyValueStore;
    use crate::test_support::MutableClock;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use std::time::Duration;

    struct Harness {
        reports: CommunityReportService,
        sessions: SessionService,
        clock: Arc<MutableClock>,
    }

    #[fixture]
    fn harness() -> Harness {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid start time");
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::default());
        let clock = Arc::new(MutableClock::new(start));
        let sessions = SessionService::new(store.clone(), clock.clone());
        let reports = CommunityReportService::new(
            store,
            clock.clone(),
            RegionCatalog::new_zealand(),
            sessions.clone(),
        );
        Harness {
            reports,
            sessions,
            clock,
        }
    }

    fn draft(city: &str, title: &str) -> ReportDraft {
        ReportDraft {
            category: ReportCategory::Flooding,
            title: title.to_owned(),
            description: "Water over the road near the bridge".to_owned(),
            city: city.to_owned(),
        }
    }

    #[rstest]
    fn submit_canonicalises_city_and_records_reporter(harness: Harness) {
        harness.sessions.sign_in("aroha@example.nz").expect("sign in");
        let report = harness
            .reports
            .submit(draft("kaikoura", " Flooded ford "))
            .expect("submit");
        assert_eq!(report.city, "Kaikōura");
        assert_eq!(report.title, "Flooded ford");
        assert_eq!(report.reporter.as_deref(), Some("aroha@example.nz"));
        assert_eq!(harness.reports.list().expect("list"), vec![report]);
    }

    #[rstest]
    fn anonymous_reports_have_no_reporter(harness: Harness) {
        let report = harness
            .reports
            .submit(draft("Timaru", "Slip"))
            .expect("submit");
        assert_eq!(report.reporter, None);
    }

    #[rstest]
    #[case(draft("Atlantis", "Flood"))]
    #[case(draft("Timaru", "   "))]
    #[case(draft("Timaru", &"x".repeat(MAX_TITLE_CHARS + 1)))]
    #[case(ReportDraft { description: String::new(), ..draft("Timaru", "Flood") })]
    fn invalid_drafts_are_rejected(harness: Harness, #[case] draft: ReportDraft) {
        let err = harness.reports.submit(draft).expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(harness.reports.list().expect("list").is_empty());
    }

    #[rstest]
    fn title_at_the_limit_is_accepted(harness: Harness) {
        let title = "ā".repeat(MAX_TITLE_CHARS);
        assert!(harness.reports.submit(draft("Timaru", &title)).is_ok());
    }

    #[rstest]
    fn list_for_filters_by_city_newest_first(harness: Harness) {
        harness.reports.submit(draft("Timaru", "First")).expect("submit");
        harness.clock.advance(Duration::from_secs(60));
        harness.reports.submit(draft("Dunedin", "Second")).expect("submit");
        harness.clock.advance(Duration::from_secs(60));
        harness.reports.submit(draft("Timaru", "Third")).expect("submit");

        let titles: Vec<_> = harness
            .reports
            .list_for(&["timaru"])
            .expect("list")
            .into_iter()
            .map(|report| report.title)
            .collect();
        assert_eq!(titles, ["Third", "First"]);
    }
}
