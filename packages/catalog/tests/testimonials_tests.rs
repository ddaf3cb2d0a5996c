// ABOUTME: Integration tests for testimonial storage
// ABOUTME: Case-insensitive client names, ordering, search precedence and rating ranges

mod common;

use atelier_catalog::{
    CatalogError, DbState, Testimonial, TestimonialCreateInput, TestimonialListFilter,
    TestimonialUpdateInput,
};
use atelier_storage::PageParams;
use common::setup_db;
use pretty_assertions::assert_eq;

async fn create_testimonial(
    db: &DbState,
    client_name: &str,
    review_text: &str,
    rating: i64,
    display_order: i64,
) -> Testimonial {
    db.testimonial_storage
        .create(TestimonialCreateInput {
            client_name: client_name.to_string(),
            review_text: Some(review_text.to_string()),
            rating,
            display_order,
        })
        .await
        .unwrap()
}

fn names(testimonials: &[Testimonial]) -> Vec<&str> {
    testimonials.iter().map(|t| t.client_name.as_str()).collect()
}

#[tokio::test]
async fn test_create_and_lookup_case_insensitive() {
    let db = setup_db().await;
    let created = create_testimonial(&db, "Jane Smith", "Absolutely stunning designs!", 5, 1).await;

    let found = db
        .testimonial_storage
        .get_by_client_name("JANE smith")
        .await
        .unwrap();
    assert_eq!(found, Some(created));
}

#[tokio::test]
async fn test_client_name_unique_ignoring_case() {
    let db = setup_db().await;
    create_testimonial(&db, "Maria Lopez", "The fitting was wonderful.", 4, 0).await;

    let result = db
        .testimonial_storage
        .create(TestimonialCreateInput {
            client_name: "maria lopez".to_string(),
            review_text: None,
            rating: 3,
            display_order: 0,
        })
        .await;

    assert!(matches!(
        result,
        Err(CatalogError::AlreadyExists { field: "client_name", .. })
    ));
    assert_eq!(db.testimonial_storage.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_validation_rules() {
    let db = setup_db().await;

    let short_review = db
        .testimonial_storage
        .create(TestimonialCreateInput {
            client_name: "Short".to_string(),
            review_text: Some("Too short".to_string()),
            rating: 3,
            display_order: 0,
        })
        .await;
    assert!(matches!(short_review, Err(CatalogError::Validation(_))));

    let bad_rating = db
        .testimonial_storage
        .create(TestimonialCreateInput {
            client_name: "Rating".to_string(),
            review_text: None,
            rating: 6,
            display_order: 0,
        })
        .await;
    assert!(matches!(bad_rating, Err(CatalogError::Validation(_))));
}

#[tokio::test]
async fn test_order_by_field_and_direction() {
    let db = setup_db().await;
    create_testimonial(&db, "Ann", "Lovely experience overall.", 3, 2).await;
    create_testimonial(&db, "Bea", "Would recommend to anyone.", 5, 0).await;
    create_testimonial(&db, "Cat", "Beautiful craftsmanship here.", 1, 1).await;

    let (by_default, total) = db
        .testimonial_storage
        .list(None, PageParams::default())
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(names(&by_default), vec!["Bea", "Cat", "Ann"]);

    let (by_rating_desc, _) = db
        .testimonial_storage
        .list(Some("-rating"), PageParams::default())
        .await
        .unwrap();
    assert_eq!(names(&by_rating_desc), vec!["Bea", "Ann", "Cat"]);

    let (unknown, _) = db
        .testimonial_storage
        .list(Some("-not_a_column"), PageParams::default())
        .await
        .unwrap();
    assert_eq!(names(&unknown), vec!["Bea", "Cat", "Ann"]);
}

#[tokio::test]
async fn test_search_matches_name_or_review() {
    let db = setup_db().await;
    create_testimonial(&db, "Grace", "The lace details were perfect.", 5, 0).await;
    create_testimonial(&db, "Lacey Dunn", "Service was quick and kind.", 4, 1).await;
    create_testimonial(&db, "Hannah", "Great alterations and advice.", 4, 2).await;

    let (found, total) = db
        .testimonial_storage
        .search("LACE", PageParams::default())
        .await
        .unwrap();

    assert_eq!(total, 2);
    assert_eq!(names(&found), vec!["Grace", "Lacey Dunn"]);
}

#[tokio::test]
async fn test_accented_client_names_fold_case() {
    let db = setup_db().await;
    let created = create_testimonial(&db, "Zoë Élise", "Une robe de rêve.", 5, 0).await;

    let found = db
        .testimonial_storage
        .get_by_client_name("zoë élise")
        .await
        .unwrap();
    assert_eq!(found, Some(created.clone()));

    let result = db
        .testimonial_storage
        .create(TestimonialCreateInput {
            client_name: "ZOË ÉLISE".to_string(),
            review_text: None,
            rating: 4,
            display_order: 1,
        })
        .await;
    assert!(matches!(
        result,
        Err(CatalogError::AlreadyExists { field: "client_name", .. })
    ));
    assert_eq!(db.testimonial_storage.count().await.unwrap(), 1);

    let (found, total) = db
        .testimonial_storage
        .search("RÊVE", PageParams::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].id, created.id);
}

#[tokio::test]
async fn test_renamed_client_is_found_by_new_name() {
    let db = setup_db().await;
    let created = create_testimonial(&db, "Ines", "Lovely fitting.", 5, 0).await;

    db.testimonial_storage
        .update(
            &created.id,
            TestimonialUpdateInput {
                client_name: Some("Inès Brûlé".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let found = db
        .testimonial_storage
        .get_by_client_name("INÈS BRÛLÉ")
        .await
        .unwrap();
    assert_eq!(found.map(|t| t.id), Some(created.id));
    assert!(db
        .testimonial_storage
        .get_by_client_name("ines")
        .await
        .unwrap()
        .is_none());

    let (found, _) = db
        .testimonial_storage
        .search("brûlé", PageParams::default())
        .await
        .unwrap();
    assert_eq!(names(&found), vec!["Inès Brûlé"]);
}

#[tokio::test]
async fn test_by_rating_range_orders_best_first() {
    let db = setup_db().await;
    create_testimonial(&db, "One", "Not quite what I hoped.", 1, 0).await;
    create_testimonial(&db, "Four", "Very good team and dress.", 4, 1).await;
    create_testimonial(&db, "Five A", "Perfect in every single way.", 5, 2).await;
    create_testimonial(&db, "Five B", "Flawless from start to end.", 5, 1).await;

    let (found, total) = db
        .testimonial_storage
        .by_rating(4, 5, PageParams::default())
        .await
        .unwrap();

    assert_eq!(total, 3);
    assert_eq!(names(&found), vec!["Five B", "Five A", "Four"]);

    assert!(matches!(
        db.testimonial_storage
            .by_rating(5, 2, PageParams::default())
            .await,
        Err(CatalogError::Validation(_))
    ));
}

#[tokio::test]
async fn test_query_precedence() {
    let db = setup_db().await;
    create_testimonial(&db, "Low", "Searchable but poorly rated.", 1, 0).await;
    create_testimonial(&db, "High", "Excellent and highly rated.", 5, 1).await;

    // search wins over the rating range
    let (found, _) = db
        .testimonial_storage
        .query(
            &TestimonialListFilter {
                search: Some("searchable".to_string()),
                min_rating: Some(4),
                ..Default::default()
            },
            PageParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(names(&found), vec!["Low"]);

    // rating range wins over ordering
    let (found, _) = db
        .testimonial_storage
        .query(
            &TestimonialListFilter {
                min_rating: Some(4),
                order_by: Some("client_name".to_string()),
                ..Default::default()
            },
            PageParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(names(&found), vec!["High"]);
}

#[tokio::test]
async fn test_update_and_delete() {
    let db = setup_db().await;
    let testimonial = create_testimonial(&db, "Editor", "Original review text here.", 3, 0).await;
    create_testimonial(&db, "Taken", "Another review for conflict.", 3, 1).await;

    let updated = db
        .testimonial_storage
        .update(
            &testimonial.id,
            TestimonialUpdateInput {
                rating: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.rating, 5);
    assert_eq!(updated.review_text, testimonial.review_text);

    let recased = db
        .testimonial_storage
        .update(
            &testimonial.id,
            TestimonialUpdateInput {
                client_name: Some("EDITOR".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(recased.client_name, "EDITOR");

    let conflict = db
        .testimonial_storage
        .update(
            &testimonial.id,
            TestimonialUpdateInput {
                client_name: Some("taken".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(conflict, Err(CatalogError::AlreadyExists { .. })));

    db.testimonial_storage.delete(&testimonial.id).await.unwrap();
    assert_eq!(db.testimonial_storage.count().await.unwrap(), 1);
}
