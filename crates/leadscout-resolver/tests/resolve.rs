//! End-to-end resolver and cohort tests against an in-memory place lookup.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use leadscout_core::{CandidateRecord, GeoPoint};
use leadscout_places::{PlaceLookup, PlacesError};
use leadscout_resolver::{
    AttemptOutcome, BusinessResolver, CohortBuilder, CohortHint, ResolveError,
};

#[derive(Default)]
struct FakePlaces {
    text: HashMap<String, Vec<CandidateRecord>>,
    /// Returned by `search_by_text` for any text without an entry in `text`.
    any_text: Vec<CandidateRecord>,
    broad: HashMap<String, Vec<CandidateRecord>>,
    details: HashMap<String, CandidateRecord>,
    nearby: Vec<CandidateRecord>,
    fail_text: bool,
    fail_all: bool,
    calls: Mutex<Vec<String>>,
}

impl FakePlaces {
    fn record_call(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn outage() -> PlacesError {
        PlacesError::UnexpectedStatus {
            status: 503,
            endpoint: "fake".to_owned(),
        }
    }
}

#[async_trait]
impl PlaceLookup for FakePlaces {
    async fn search_by_text(&self, text: &str) -> Result<Vec<CandidateRecord>, PlacesError> {
        self.record_call(format!("text:{text}"));
        if self.fail_all || self.fail_text {
            return Err(Self::outage());
        }
        Ok(self
            .text
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.any_text.clone()))
    }

    async fn search_broad(&self, text: &str) -> Result<Vec<CandidateRecord>, PlacesError> {
        self.record_call(format!("broad:{text}"));
        if self.fail_all {
            return Err(Self::outage());
        }
        Ok(self.broad.get(text).cloned().unwrap_or_default())
    }

    async fn get_details(&self, identifier: &str) -> Result<Option<CandidateRecord>, PlacesError> {
        self.record_call(format!("details:{identifier}"));
        if self.fail_all {
            return Err(Self::outage());
        }
        Ok(self.details.get(identifier).cloned())
    }

    async fn search_nearby(
        &self,
        _center: GeoPoint,
        category_hint: &str,
        radius_meters: u32,
    ) -> Result<Vec<CandidateRecord>, PlacesError> {
        self.record_call(format!("nearby:{category_hint}:{radius_meters}"));
        if self.fail_all {
            return Err(Self::outage());
        }
        Ok(self.nearby.clone())
    }
}

fn place(id: &str, name: &str, rating: Option<f64>, reviews: Option<u32>) -> CandidateRecord {
    CandidateRecord {
        place_id: Some(id.to_owned()),
        name: name.to_owned(),
        formatted_address: "100 Main St, Waco, TX 76701".to_owned(),
        rating,
        review_count: reviews,
        location: Some(GeoPoint {
            lat: 31.5493,
            lng: -97.1467,
        }),
        categories: vec![],
    }
}

fn ace() -> CandidateRecord {
    place("ace", "Ace Pest Control", Some(4.6), Some(18))
}

#[tokio::test]
async fn resolves_exact_match_on_first_variant() {
    let fake = FakePlaces {
        text: HashMap::from([("Ace Pest Control, Waco, TX".to_owned(), vec![ace()])]),
        ..FakePlaces::default()
    };

    let resolution = BusinessResolver::new(&fake)
        .resolve("Ace Pest Control, Waco, TX")
        .await
        .expect("should resolve");

    assert_eq!(resolution.business.record.name, "Ace Pest Control");
    assert_eq!(resolution.business.record.review_count, Some(18));
    assert_eq!(resolution.business.matched_variant, "Ace Pest Control, Waco, TX");
    assert!(!resolution.business.incomplete_data);
    assert_eq!(resolution.attempts.len(), 1);
    assert_eq!(fake.calls(), vec!["text:Ace Pest Control, Waco, TX".to_owned()]);
}

#[tokio::test]
async fn incompatible_establishment_falls_through_to_not_found() {
    let fake = FakePlaces {
        any_text: vec![place("tony", "Tony's Bistro", Some(4.1), Some(5))],
        ..FakePlaces::default()
    };

    let err = BusinessResolver::new(&fake)
        .resolve("Tony's Pizza")
        .await
        .unwrap_err();

    match err {
        ResolveError::NotFound { query, attempts } => {
            assert_eq!(query, "Tony's Pizza");
            assert_eq!(attempts.len(), 2);
            for attempt in &attempts {
                assert_eq!(
                    attempt.outcome,
                    AttemptOutcome::Rejected {
                        near_misses: vec!["Tony's Bistro".to_owned()],
                    }
                );
            }
        }
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn provider_outage_on_every_call_is_unavailable() {
    let fake = FakePlaces {
        fail_all: true,
        ..FakePlaces::default()
    };

    let err = BusinessResolver::new(&fake)
        .resolve("Ace Pest Control, Waco, TX")
        .await
        .unwrap_err();

    assert!(
        matches!(err, ResolveError::CollaboratorUnavailable { ref query, .. } if query == "Ace Pest Control, Waco, TX"),
        "got: {err:?}"
    );
    // Three variants, primary and broad search each.
    assert_eq!(fake.calls().len(), 6);
}

#[tokio::test]
async fn partial_outage_degrades_to_not_found() {
    let fake = FakePlaces {
        fail_text: true,
        ..FakePlaces::default()
    };

    let err = BusinessResolver::new(&fake)
        .resolve("Joe's Pizza")
        .await
        .unwrap_err();

    match err {
        ResolveError::NotFound { attempts, .. } => {
            assert!(attempts
                .iter()
                .all(|a| a.outcome == AttemptOutcome::NoCandidates));
        }
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn missing_metrics_are_fetched_from_details() {
    let fake = FakePlaces {
        any_text: vec![place("ace", "Ace Pest Control", None, None)],
        details: HashMap::from([("ace".to_owned(), ace())]),
        ..FakePlaces::default()
    };

    let resolution = BusinessResolver::new(&fake)
        .resolve("Ace Pest Control")
        .await
        .unwrap();

    assert_eq!(resolution.business.record.rating, Some(4.6));
    assert_eq!(resolution.business.record.review_count, Some(18));
    assert!(!resolution.business.incomplete_data);
    assert!(fake.calls().contains(&"details:ace".to_owned()));
}

#[tokio::test]
async fn record_without_metrics_is_flagged_incomplete() {
    let fake = FakePlaces {
        any_text: vec![place("ace", "Ace Pest Control", None, Some(18))],
        ..FakePlaces::default()
    };

    let resolution = BusinessResolver::new(&fake)
        .resolve("Ace Pest Control")
        .await
        .unwrap();

    assert!(resolution.business.incomplete_data);
    assert_eq!(resolution.business.record.name, "Ace Pest Control");
}

#[tokio::test]
async fn zero_rating_and_reviews_are_flagged_incomplete() {
    let fake = FakePlaces {
        any_text: vec![place("ace", "Ace Pest Control", Some(0.0), Some(0))],
        ..FakePlaces::default()
    };

    let resolution = BusinessResolver::new(&fake)
        .resolve("Ace Pest Control")
        .await
        .unwrap();
    assert!(resolution.business.incomplete_data);
}

#[tokio::test]
async fn category_variant_accepts_related_business() {
    let fake = FakePlaces {
        text: HashMap::from([(
            "pest control Waco TX".to_owned(),
            vec![place("acex", "Ace Exterminators", Some(4.3), Some(61))],
        )]),
        ..FakePlaces::default()
    };

    let resolution = BusinessResolver::new(&fake)
        .resolve("Ace Pest Control, Waco, TX")
        .await
        .unwrap();

    assert_eq!(resolution.business.record.name, "Ace Exterminators");
    assert_eq!(resolution.business.matched_variant, "pest control Waco TX");
    let outcomes: Vec<&AttemptOutcome> = resolution.attempts.iter().map(|a| &a.outcome).collect();
    assert_eq!(outcomes[0], &AttemptOutcome::NoCandidates);
    assert_eq!(outcomes[1], &AttemptOutcome::NoCandidates);
    assert!(matches!(outcomes[2], AttemptOutcome::Accepted { .. }));
}

#[tokio::test]
async fn broad_search_is_tried_after_empty_primary() {
    let fake = FakePlaces {
        broad: HashMap::from([("Ace Pest Control".to_owned(), vec![ace()])]),
        ..FakePlaces::default()
    };

    let resolution = BusinessResolver::new(&fake)
        .resolve("Ace Pest Control")
        .await
        .unwrap();

    assert_eq!(resolution.business.record.place_id.as_deref(), Some("ace"));
    assert_eq!(
        fake.calls(),
        vec![
            "text:Ace Pest Control".to_owned(),
            "broad:Ace Pest Control".to_owned(),
        ]
    );
}

#[tokio::test]
async fn url_place_identifier_is_authoritative() {
    let fake = FakePlaces {
        details: HashMap::from([("ChIJace".to_owned(), ace())]),
        ..FakePlaces::default()
    };

    let resolution = BusinessResolver::new(&fake)
        .resolve("https://www.google.com/maps/place/Ace/data=!4m2!3m1!1sChIJace!8m2")
        .await
        .unwrap();

    assert_eq!(resolution.business.matched_variant, "place:ChIJace");
    assert_eq!(resolution.business.record.name, "Ace Pest Control");
    assert_eq!(fake.calls(), vec!["details:ChIJace".to_owned()]);
}

#[tokio::test]
async fn blank_query_is_rejected() {
    let fake = FakePlaces::default();
    let err = BusinessResolver::new(&fake).resolve("   ").await.unwrap_err();
    assert!(matches!(err, ResolveError::EmptyQuery));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn cohort_preserves_order_excludes_self_and_truncates() {
    let fake = FakePlaces {
        nearby: vec![
            ace(),
            place("a", "Alpha Pest", Some(4.9), Some(300)),
            place("b", "Bravo Pest", None, Some(12)),
            place("c", "Charlie Pest", Some(4.1), Some(80)),
            place("d", "Delta Pest", Some(4.7), Some(42)),
        ],
        ..FakePlaces::default()
    };
    let business = BusinessResolver::new(&FakePlaces {
        any_text: vec![ace()],
        ..FakePlaces::default()
    })
    .resolve("Ace Pest Control, Waco, TX")
    .await
    .unwrap();

    let hint = CohortHint::infer(&business.query, &business.business, 8000).unwrap();
    let cohort = CohortBuilder::new(&fake, 2)
        .build_cohort(&hint, &business.business)
        .await
        .unwrap();

    let names: Vec<&str> = cohort.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha Pest", "Charlie Pest"]);
    assert!(cohort.iter().all(|c| c.gathered_for.as_deref() == Some("ace")));
    assert_eq!(fake.calls(), vec!["nearby:pest control:8000".to_owned()]);
}

#[tokio::test]
async fn text_cohort_falls_back_to_primary_search() {
    let fake = FakePlaces {
        text: HashMap::from([(
            "pest control Waco TX".to_owned(),
            vec![place("d", "Delta Pest", Some(4.7), Some(42))],
        )]),
        ..FakePlaces::default()
    };
    let mut business = BusinessResolver::new(&FakePlaces {
        any_text: vec![ace()],
        ..FakePlaces::default()
    })
    .resolve("Ace Pest Control")
    .await
    .unwrap()
    .business;
    business.record.location = None;

    let cohort = CohortBuilder::new(&fake, 10)
        .build_cohort(&CohortHint::text("pest control Waco TX"), &business)
        .await
        .unwrap();

    assert_eq!(cohort.len(), 1);
    assert!(cohort[0].distance_meters.abs() < f64::EPSILON);
    assert_eq!(
        fake.calls(),
        vec![
            "broad:pest control Waco TX".to_owned(),
            "text:pest control Waco TX".to_owned(),
        ]
    );
}

#[tokio::test]
async fn cohort_search_failure_is_surfaced() {
    let fake = FakePlaces {
        fail_all: true,
        ..FakePlaces::default()
    };
    let business = BusinessResolver::new(&FakePlaces {
        any_text: vec![ace()],
        ..FakePlaces::default()
    })
    .resolve("Ace Pest Control")
    .await
    .unwrap()
    .business;

    let result = CohortBuilder::new(&fake, 10)
        .build_cohort(&CohortHint::text("pest control"), &business)
        .await;
    assert!(result.is_err());
}
