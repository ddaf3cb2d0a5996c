// ABOUTME: Integration tests for package storage
// ABOUTME: Feature lists, flags, name search, duplicate names and existence checks

mod common;

use std::str::FromStr;

use atelier_catalog::{CatalogError, Package, PackageCreateInput, PackageListFilter, PackageUpdateInput};
use atelier_catalog::DbState;
use atelier_storage::{ListInput, PageParams};
use common::setup_db;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn package_input(name: &str, display_order: i64) -> PackageCreateInput {
    PackageCreateInput {
        name: name.to_string(),
        price: Decimal::from_str("499.99").unwrap(),
        description: None,
        features: None,
        pdf_url: None,
        is_active: true,
        is_popular: false,
        display_order,
    }
}

async fn create_package(db: &DbState, name: &str, display_order: i64) -> Package {
    db.package_storage
        .create(package_input(name, display_order))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_package_with_features() {
    let db = setup_db().await;

    let mut input = package_input("Gold Package", 1);
    input.features = Some(ListInput::from("Two fittings\nVeil steaming\n\n  Delivery  "));
    input.pdf_url = Some("https://cdn.example.com/gold.pdf".to_string());

    let package = db.package_storage.create(input).await.unwrap();

    assert_eq!(package.slug, "gold-package");
    assert_eq!(package.features, vec!["Two fittings", "Veil steaming", "Delivery"]);
    assert_eq!(package.download_link, package.pdf_url);
    assert!(package.is_active);
    assert!(!package.is_popular);

    let fetched = db.package_storage.get(&package.id).await.unwrap();
    assert_eq!(fetched, package);
}

#[tokio::test]
async fn test_empty_features_read_as_empty_list() {
    let db = setup_db().await;

    let mut input = package_input("Bare", 0);
    input.features = Some(ListInput::from("  \n \n  "));

    let package = db.package_storage.create(input).await.unwrap();
    assert!(package.features.is_empty());
}

#[tokio::test]
async fn test_duplicate_package_name() {
    let db = setup_db().await;
    create_package(&db, "Silver", 0).await;

    let result = db.package_storage.create(package_input("Silver", 1)).await;
    assert!(matches!(
        result,
        Err(CatalogError::AlreadyExists { entity: "Package", .. })
    ));
}

#[tokio::test]
async fn test_negative_display_order_rejected() {
    let db = setup_db().await;

    let result = db.package_storage.create(package_input("Backwards", -1)).await;
    assert!(matches!(result, Err(CatalogError::Validation(_))));
}

#[tokio::test]
async fn test_list_orders_by_display_order_and_filters() {
    let db = setup_db().await;
    create_package(&db, "Third", 3).await;
    create_package(&db, "First", 1).await;
    let popular = create_package(&db, "Second", 2).await;
    db.package_storage
        .update(
            &popular.id,
            PackageUpdateInput {
                is_popular: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let (all, total) = db
        .package_storage
        .list(&PackageListFilter::default(), PageParams::default())
        .await
        .unwrap();
    assert_eq!(total, 3);
    let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);

    let (popular_only, total) = db
        .package_storage
        .list(
            &PackageListFilter {
                popular_only: true,
                ..Default::default()
            },
            PageParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(popular_only[0].name, "Second");
}

#[tokio::test]
async fn test_search_by_name() {
    let db = setup_db().await;
    create_package(&db, "Royal Wedding", 0).await;
    create_package(&db, "Garden Party", 1).await;

    let (found, total) = db
        .package_storage
        .search_by_name("wed", PageParams::default())
        .await
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(found[0].name, "Royal Wedding");
}

#[tokio::test]
async fn test_search_by_name_folds_accents_and_follows_renames() {
    let db = setup_db().await;
    let package = create_package(&db, "Forfait Élégance", 0).await;
    create_package(&db, "Elegant Basics", 1).await;
    assert_eq!(package.slug, "forfait-elegance");

    let (found, total) = db
        .package_storage
        .search_by_name("ÉLÉGANCE", PageParams::default())
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].id, package.id);

    db.package_storage
        .update(
            &package.id,
            PackageUpdateInput {
                name: Some("Forfait Cérémonie".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let (found, _) = db
        .package_storage
        .search_by_name("cérémonie", PageParams::default())
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    let (found, _) = db
        .package_storage
        .search_by_name("élégance", PageParams::default())
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_lookup_by_slug_and_name() {
    let db = setup_db().await;
    let package = create_package(&db, "Platinum Plus", 0).await;

    let by_slug = db.package_storage.get_by_slug("platinum-plus").await.unwrap();
    assert_eq!(by_slug.map(|p| p.id), Some(package.id.clone()));

    let by_name = db.package_storage.get_by_name("Platinum Plus").await.unwrap();
    assert_eq!(by_name.map(|p| p.id), Some(package.id));
}

#[tokio::test]
async fn test_update_features_and_price() {
    let db = setup_db().await;
    let package = create_package(&db, "Editable", 0).await;

    let updated = db
        .package_storage
        .update(
            &package.id,
            PackageUpdateInput {
                features: Some(Some(ListInput::from(vec!["Alterations".to_string()]))),
                price: Some(Decimal::from_str("650").unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.features, vec!["Alterations"]);
    assert_eq!(updated.price, Decimal::from_str("650").unwrap());
    assert_eq!(updated.display_order, package.display_order);
}

#[tokio::test]
async fn test_exists_and_delete() {
    let db = setup_db().await;
    let package = create_package(&db, "Temporary", 0).await;

    assert!(db.package_storage.exists(&package.id).await.unwrap());

    db.package_storage.delete(&package.id).await.unwrap();

    assert!(!db.package_storage.exists(&package.id).await.unwrap());
    assert!(matches!(
        db.package_storage.delete(&package.id).await,
        Err(CatalogError::NotFound { .. })
    ));
}
