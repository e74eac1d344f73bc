// tests/sqlite_repositories.rs
use chrono::Duration;
use slugkeeper::domain::errors::DomainError;
use slugkeeper::domain::product::{
    NewProduct, Product, ProductName, ProductRepository, ProductUpdate,
};
use slugkeeper::domain::slug::{
    NewSlugRecord, Slug, SlugParentId, SlugRepository, SlugSettings, Sluggable,
};
use slugkeeper::infrastructure::database;
use slugkeeper::infrastructure::repositories::{SqliteProductRepository, SqliteSlugRepository};
use slugkeeper::infrastructure::util::DefaultSlugGenerator;
use sqlx::SqlitePool;
use std::sync::Arc;

mod support;

use support::fixed_now;

/// A private in-memory database; one connection so every query sees it.
async fn pool() -> Arc<SqlitePool> {
    let pool = database::init_pool("sqlite::memory:", 1).await.unwrap();
    database::run_migrations(&pool).await.unwrap();
    Arc::new(pool)
}

async fn product(repo: &SqliteProductRepository, name: &str) -> Product {
    repo.insert(NewProduct {
        name: ProductName::new(name).unwrap(),
        description: None,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    })
    .await
    .unwrap()
}

fn record(parent: &Product, slug: &str, age_secs: i64) -> NewSlugRecord {
    NewSlugRecord::active(
        SlugParentId(parent.id.0),
        Slug::new(slug).unwrap(),
        fixed_now() - Duration::seconds(age_secs),
    )
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let pool = pool().await;
    let products = SqliteProductRepository::new(Arc::clone(&pool));
    let slugs = SqliteSlugRepository::products(Arc::clone(&pool));
    let first = product(&products, "First").await;
    let second = product(&products, "Second").await;

    slugs.insert(record(&first, "foo", 0)).await.unwrap();
    let err = slugs.insert(record(&second, "foo", 0)).await.unwrap_err();

    assert!(
        matches!(err, DomainError::Conflict(ref msg) if msg == "slug already exists"),
        "{err:?}"
    );
}

#[tokio::test]
async fn slugs_must_belong_to_an_existing_product() {
    let pool = pool().await;
    let slugs = SqliteSlugRepository::products(pool);

    let err = slugs
        .insert(NewSlugRecord::active(
            SlugParentId(404),
            Slug::new("orphan").unwrap(),
            fixed_now(),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound(_)), "{err:?}");
}

#[tokio::test]
async fn listings_are_most_recent_first() {
    let pool = pool().await;
    let products = SqliteProductRepository::new(Arc::clone(&pool));
    let slugs = SqliteSlugRepository::products(Arc::clone(&pool));
    let owner = product(&products, "Owner").await;
    let parent = SlugParentId(owner.id.0);

    let oldest = slugs.insert(record(&owner, "oldest", 30)).await.unwrap();
    slugs.insert(record(&owner, "newest", 10)).await.unwrap();
    slugs.insert(record(&owner, "middle", 20)).await.unwrap();
    slugs.set_active(oldest.id, false).await.unwrap();

    let active: Vec<String> = slugs
        .list_active(parent)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.slug.into_inner())
        .collect();
    assert_eq!(active, ["newest", "middle"]);

    let all: Vec<String> = slugs
        .list_by_parent(parent)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.slug.into_inner())
        .collect();
    assert_eq!(all, ["newest", "middle", "oldest"]);

    assert!(slugs.has_active(parent).await.unwrap());
    assert!(slugs.slug_exists(&Slug::new("oldest").unwrap()).await.unwrap());
    assert!(!slugs.slug_exists(&Slug::new("missing").unwrap()).await.unwrap());
}

#[tokio::test]
async fn equal_timestamps_break_ties_by_id() {
    let pool = pool().await;
    let products = SqliteProductRepository::new(Arc::clone(&pool));
    let slugs = SqliteSlugRepository::products(Arc::clone(&pool));
    let owner = product(&products, "Owner").await;

    slugs.insert(record(&owner, "first", 0)).await.unwrap();
    slugs.insert(record(&owner, "second", 0)).await.unwrap();

    let active = slugs.list_active(SlugParentId(owner.id.0)).await.unwrap();
    assert_eq!(active[0].slug.as_str(), "second");
}

#[tokio::test]
async fn batch_listing_covers_only_requested_owners() {
    let pool = pool().await;
    let products = SqliteProductRepository::new(Arc::clone(&pool));
    let slugs = SqliteSlugRepository::products(Arc::clone(&pool));
    let a = product(&products, "A").await;
    let b = product(&products, "B").await;
    let c = product(&products, "C").await;
    slugs.insert(record(&a, "a", 0)).await.unwrap();
    slugs.insert(record(&b, "b", 0)).await.unwrap();
    slugs.insert(record(&c, "c", 0)).await.unwrap();

    let records = slugs
        .list_active_for_parents(&[SlugParentId(a.id.0), SlugParentId(c.id.0)])
        .await
        .unwrap();
    let mut found: Vec<&str> = records.iter().map(|r| r.slug.as_str()).collect();
    found.sort_unstable();
    assert_eq!(found, ["a", "c"]);

    assert!(slugs.list_active_for_parents(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn toggling_an_unknown_record_is_not_found() {
    let pool = pool().await;
    let slugs = SqliteSlugRepository::products(pool);

    let err = slugs
        .set_active(slugkeeper::domain::slug::SlugRecordId(99), false)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn products_page_in_id_order_with_total() {
    let pool = pool().await;
    let products = SqliteProductRepository::new(pool);
    for name in ["one", "two", "three"] {
        product(&products, name).await;
    }

    let (page, total) = products.list_page(2, 1).await.unwrap();
    let names: Vec<&str> = page.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["two", "three"]);
    assert_eq!(total, 3);
}

#[tokio::test]
async fn manager_over_sqlite_round_trips() {
    let pool = pool().await;
    let products = SqliteProductRepository::new(Arc::clone(&pool));
    let slugs: Arc<dyn SlugRepository> = Arc::new(SqliteSlugRepository::products(Arc::clone(&pool)));
    let manager = support::slug_manager(slugs, Arc::new(DefaultSlugGenerator), SlugSettings::default());

    let first = product(&products, "Foo").await;
    let second = product(&products, "Foo").await;

    let mut first = Sluggable::new(Arc::clone(&manager), first);
    first.ensure_slug().await.unwrap();
    let mut second = Sluggable::new(Arc::clone(&manager), second);
    second.ensure_slug().await.unwrap();

    assert_eq!(first.slug().await.unwrap().unwrap().as_str(), "foo");
    assert_eq!(second.slug().await.unwrap().unwrap().as_str(), "foo-1");
}

#[tokio::test]
async fn touching_a_record_makes_it_current() {
    let pool = pool().await;
    let products = SqliteProductRepository::new(Arc::clone(&pool));
    let slugs = SqliteSlugRepository::products(Arc::clone(&pool));
    let owner = product(&products, "Owner").await;
    let parent = SlugParentId(owner.id.0);

    let older = slugs.insert(record(&owner, "older", 30)).await.unwrap();
    slugs.insert(record(&owner, "newer", 10)).await.unwrap();

    let touched = slugs.touch(older.id, fixed_now()).await.unwrap();
    assert_eq!(touched.created_at, fixed_now());

    let active: Vec<String> = slugs
        .list_active(parent)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.slug.into_inner())
        .collect();
    assert_eq!(active, ["older", "newer"]);

    let err = slugs
        .touch(slugkeeper::domain::slug::SlugRecordId(99), fixed_now())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)), "{err:?}");
}

#[tokio::test]
async fn descriptions_are_stored_and_cleared() {
    let pool = pool().await;
    let products = SqliteProductRepository::new(pool);
    let created = products
        .insert(NewProduct {
            name: ProductName::new("Desk").unwrap(),
            description: Some("Solid *oak*".into()),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        })
        .await
        .unwrap();
    assert_eq!(created.description.as_deref(), Some("Solid *oak*"));

    let mut update = ProductUpdate::from(&created);
    update.description = None;
    let updated = products.update(update).await.unwrap();
    assert_eq!(updated.description, None);

    let reloaded = products.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(reloaded.description, None);
}
