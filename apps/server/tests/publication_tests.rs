//! Publication lifecycle integration tests

mod support;

use chrono::{Duration, Utc};
use goodtogo::{db::PublicationStore, Error};
use goodtogo_models::{PublicationDraft, PublicationStatus, PublicationUpdate};
use support::{bakery_draft, in_hours, offer_draft, TestApp};

#[tokio::test]
async fn new_publication_starts_available_with_server_post_date() -> anyhow::Result<()> {
    let app = TestApp::new();
    let bakery = app
        .state
        .establishments
        .add(&bakery_draft("padaria@example.com", 38.7, -9.1))
        .await?;

    let before = Utc::now();
    let publication = app
        .state
        .publications
        .add(&offer_draft(bakery.id, "sourdough bread", 3.0))
        .await?;

    assert_eq!(publication.status, PublicationStatus::Available);
    assert!(publication.post_date >= before && publication.post_date <= Utc::now());
    Ok(())
}

#[tokio::test]
async fn non_positive_price_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new();
    let bakery = app
        .state
        .establishments
        .add(&bakery_draft("padaria@example.com", 38.7, -9.1))
        .await?;

    for price in [0.0, -2.5] {
        let err = app
            .state
            .publications
            .add(&offer_draft(bakery.id, "sourdough bread", price))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPrice(p) if p == price));
    }
    Ok(())
}

#[tokio::test]
async fn past_end_date_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new();
    let bakery = app
        .state
        .establishments
        .add(&bakery_draft("padaria@example.com", 38.7, -9.1))
        .await?;

    let mut draft = offer_draft(bakery.id, "sourdough bread", 3.0);
    draft.end_date = in_hours(-1);
    let err = app.state.publications.add(&draft).await.unwrap_err();

    assert!(matches!(err, Error::InvalidEndDate));
    Ok(())
}

#[tokio::test]
async fn over_length_description_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new();
    let bakery = app
        .state
        .establishments
        .add(&bakery_draft("padaria@example.com", 38.7, -9.1))
        .await?;

    let long = "x".repeat(101);
    let err = app
        .state
        .publications
        .add(&offer_draft(bakery.id, &long, 3.0))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let exact = "x".repeat(100);
    assert!(app
        .state
        .publications
        .add(&offer_draft(bakery.id, &exact, 3.0))
        .await
        .is_ok());
    Ok(())
}

#[tokio::test]
async fn unknown_establishment_is_rejected() {
    let app = TestApp::new();

    let err = app
        .state
        .publications
        .add(&offer_draft(42, "sourdough bread", 3.0))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EstablishmentNotFound { id: 42 }));
}

#[tokio::test]
async fn expired_publications_are_swept_and_stay_unavailable() -> anyhow::Result<()> {
    let app = TestApp::new();
    let bakery = app
        .state
        .establishments
        .add(&bakery_draft("padaria@example.com", 38.7, -9.1))
        .await?;

    let fresh = app
        .state
        .publications
        .add(&offer_draft(bakery.id, "sourdough bread", 3.0))
        .await?;

    // Backdate an offer past its end date directly in the store; the
    // service refuses to create one, but rows age in place.
    let expired = app
        .publication_store
        .insert(
            &PublicationDraft {
                establishment_id: bakery.id,
                description: "yesterday's croissants".to_string(),
                price: 1.0,
                end_date: Utc::now() - Duration::hours(1),
            },
            Utc::now() - Duration::hours(12),
        )
        .await?;

    let available = app.state.publications.get_available().await?;
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, fresh.id);

    // The flip is persisted, not recomputed per read.
    let swept = app.state.publications.get(expired.id).await?;
    assert_eq!(swept.status, PublicationStatus::Unavailable);
    Ok(())
}

#[tokio::test]
async fn generic_update_cannot_mark_sold() -> anyhow::Result<()> {
    let app = TestApp::new();
    let bakery = app
        .state
        .establishments
        .add(&bakery_draft("padaria@example.com", 38.7, -9.1))
        .await?;
    let publication = app
        .state
        .publications
        .add(&offer_draft(bakery.id, "sourdough bread", 3.0))
        .await?;

    let update = PublicationUpdate {
        establishment_id: bakery.id,
        description: "sourdough bread".to_string(),
        price: 3.0,
        end_date: in_hours(6),
        status: PublicationStatus::Sold,
    };
    let err = app
        .state
        .publications
        .update(publication.id, &update)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // The dedicated status path is the one way to record a sale.
    let sold = app
        .state
        .publications
        .update_status(publication.id, PublicationStatus::Sold)
        .await?;
    assert_eq!(sold.status, PublicationStatus::Sold);
    Ok(())
}

#[tokio::test]
async fn update_preserves_post_date() -> anyhow::Result<()> {
    let app = TestApp::new();
    let bakery = app
        .state
        .establishments
        .add(&bakery_draft("padaria@example.com", 38.7, -9.1))
        .await?;
    let publication = app
        .state
        .publications
        .add(&offer_draft(bakery.id, "sourdough bread", 3.0))
        .await?;

    let update = PublicationUpdate {
        establishment_id: bakery.id,
        description: "rye bread".to_string(),
        price: 2.5,
        end_date: in_hours(12),
        status: PublicationStatus::Available,
    };
    let updated = app.state.publications.update(publication.id, &update).await?;

    assert_eq!(updated.description, "rye bread");
    assert_eq!(updated.post_date, publication.post_date);
    Ok(())
}

#[tokio::test]
async fn price_range_validates_bounds() -> anyhow::Result<()> {
    let app = TestApp::new();
    let bakery = app
        .state
        .establishments
        .add(&bakery_draft("padaria@example.com", 38.7, -9.1))
        .await?;
    app.state
        .publications
        .add(&offer_draft(bakery.id, "sourdough bread", 3.0))
        .await?;

    let err = app
        .state
        .publications
        .list_by_price_range(5.0, 2.0)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = app
        .state
        .publications
        .list_by_price_range(-1.0, 2.0)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // Bounds are inclusive.
    let hits = app.state.publications.list_by_price_range(3.0, 3.0).await?;
    assert_eq!(hits.len(), 1);
    Ok(())
}

#[tokio::test]
async fn store_reads_report_empty_results_as_not_found() {
    let app = TestApp::new();

    let err = app.state.publications.list().await.unwrap_err();
    assert!(matches!(err, Error::NoPublicationsFound));

    let err = app.state.publications.get_available().await.unwrap_err();
    assert!(matches!(err, Error::NoPublicationsFound));

    let err = app.state.publications.get(7).await.unwrap_err();
    assert!(matches!(err, Error::PublicationNotFound { id: 7 }));

    let err = app.state.publications.get(0).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn status_listings_filter_by_establishment() -> anyhow::Result<()> {
    let app = TestApp::new();
    let bakery = app
        .state
        .establishments
        .add(&bakery_draft("padaria@example.com", 38.7, -9.1))
        .await?;
    let other = app
        .state
        .establishments
        .add(&bakery_draft("outra@example.com", 41.1, -8.6))
        .await?;

    let sold = app
        .state
        .publications
        .add(&offer_draft(bakery.id, "sourdough bread", 3.0))
        .await?;
    app.state
        .publications
        .update_status(sold.id, PublicationStatus::Sold)
        .await?;
    app.state
        .publications
        .add(&offer_draft(other.id, "croissants", 2.0))
        .await?;

    let hits = app
        .state
        .publications
        .list_by_establishment_and_status(bakery.id, PublicationStatus::Sold)
        .await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, sold.id);

    let err = app
        .state
        .publications
        .list_by_establishment_and_status(other.id, PublicationStatus::Sold)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoPublicationsFound));
    Ok(())
}
