//! Live integration tests for glossy-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/glossy-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use glossy_core::ScrapedProduct;
use glossy_db::{
    insert_product, list_products, list_store_counts, upload_products, InsertOutcome,
    ProductListFilters, ProductSort,
};
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_product(name: &str, price: f64, store: &str) -> ScrapedProduct {
    ScrapedProduct {
        name: name.to_string(),
        price,
        store: store.to_string(),
        image_url: format!("https://img.example.com/{}.jpg", name.replace(' ', "-")),
        category: "Skincare".to_string(),
        link: format!("https://shop.example.com/p/{}", name.replace(' ', "-")),
    }
}

// ---------------------------------------------------------------------------
// Section 1: Idempotent upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn insert_then_duplicate_is_skipped(pool: sqlx::PgPool) {
    let product = make_product("A Serum", 500.0, "X");

    let first = insert_product(&pool, &product)
        .await
        .expect("first insert failed");
    assert_eq!(first, InsertOutcome::Inserted);

    let second = insert_product(&pool, &product)
        .await
        .expect("second insert failed");
    assert_eq!(second, InsertOutcome::DuplicateSkipped);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await
        .expect("count failed");
    assert_eq!(count, 1, "duplicate must not create a second row");
}

#[sqlx::test(migrations = "../../migrations")]
async fn first_write_wins_on_conflicting_price(pool: sqlx::PgPool) {
    insert_product(&pool, &make_product("A Serum", 500.0, "X"))
        .await
        .expect("first insert failed");
    insert_product(&pool, &make_product("A Serum", 999.0, "X"))
        .await
        .expect("second insert failed");

    let price: Decimal = sqlx::query_scalar("SELECT price FROM products WHERE name = 'A Serum'")
        .fetch_one(&pool)
        .await
        .expect("price lookup failed");
    assert_eq!(price, Decimal::new(500, 0), "later duplicates never overwrite");
}

#[sqlx::test(migrations = "../../migrations")]
async fn same_name_different_store_is_a_distinct_row(pool: sqlx::PgPool) {
    insert_product(&pool, &make_product("A Serum", 500.0, "X"))
        .await
        .expect("insert X failed");
    let outcome = insert_product(&pool, &make_product("A Serum", 700.0, "Y"))
        .await
        .expect("insert Y failed");
    assert_eq!(outcome, InsertOutcome::Inserted);
}

#[sqlx::test(migrations = "../../migrations")]
async fn price_is_rounded_to_two_decimal_places(pool: sqlx::PgPool) {
    insert_product(&pool, &make_product("Fraction Cream", 19.999, "X"))
        .await
        .expect("insert failed");

    let price: Decimal =
        sqlx::query_scalar("SELECT price FROM products WHERE name = 'Fraction Cream'")
            .fetch_one(&pool)
            .await
            .expect("price lookup failed");
    assert_eq!(price, Decimal::new(2000, 2));
}

// ---------------------------------------------------------------------------
// Section 2: Upload loop
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn upload_tallies_inserted_and_skipped(pool: sqlx::PgPool) {
    let products = vec![
        make_product("A Serum", 500.0, "X"),
        make_product("B Cream", 750.0, "X"),
        // Same (name, store) as the first record.
        make_product("A Serum", 500.0, "X"),
    ];

    let tally = upload_products(&pool, &products).await;
    assert_eq!(tally.inserted, 2);
    assert_eq!(tally.skipped, 1);
    assert_eq!(tally.failed, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn failing_record_does_not_abort_the_remaining_inserts(pool: sqlx::PgPool) {
    let products = vec![
        make_product("A Serum", 500.0, "X"),
        // NUMERIC(10,2) overflows at 10^8; this record fails at the engine.
        make_product("Overflow Essence", 1e12, "X"),
        make_product("C Toner", 900.0, "X"),
    ];

    let tally = upload_products(&pool, &products).await;
    assert_eq!(tally.inserted, 2);
    assert_eq!(tally.skipped, 0);
    assert_eq!(tally.failed, 1, "overflow is counted, not propagated");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await
        .expect("count failed");
    assert_eq!(count, 2, "records after the failure were still attempted");
}

// ---------------------------------------------------------------------------
// Section 3: Read path
// ---------------------------------------------------------------------------

async fn seed_catalog(pool: &sqlx::PgPool) {
    for product in [
        make_product("Snail Mucin Essence", 1290.0, "YesStyle"),
        make_product("Green Tea Cleanser", 28000.0, "Chicor"),
        make_product("Cica Balm", 900.0, "YesStyle"),
    ] {
        insert_product(pool, &product)
            .await
            .expect("seed insert failed");
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_products_default_sort_is_price_ascending(pool: sqlx::PgPool) {
    seed_catalog(&pool).await;

    let rows = list_products(
        &pool,
        ProductListFilters {
            limit: 50,
            ..Default::default()
        },
    )
    .await
    .expect("list failed");

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Cica Balm", "Snail Mucin Essence", "Green Tea Cleanser"]
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_products_search_is_case_insensitive_substring(pool: sqlx::PgPool) {
    seed_catalog(&pool).await;

    let rows = list_products(
        &pool,
        ProductListFilters {
            search: Some("mucin"),
            limit: 50,
            ..Default::default()
        },
    )
    .await
    .expect("list failed");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Snail Mucin Essence");
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_products_filters_by_store_and_price_range(pool: sqlx::PgPool) {
    seed_catalog(&pool).await;

    let rows = list_products(
        &pool,
        ProductListFilters {
            store: Some("YesStyle"),
            min_price: Some(1000.0),
            max_price: Some(2000.0),
            limit: 50,
            ..Default::default()
        },
    )
    .await
    .expect("list failed");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Snail Mucin Essence");
    assert_eq!(rows[0].store, "YesStyle");
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_products_paginates_with_limit_and_offset(pool: sqlx::PgPool) {
    seed_catalog(&pool).await;

    let page_one = list_products(
        &pool,
        ProductListFilters {
            limit: 2,
            ..Default::default()
        },
    )
    .await
    .expect("page one failed");
    let page_two = list_products(
        &pool,
        ProductListFilters {
            limit: 2,
            offset: 2,
            ..Default::default()
        },
    )
    .await
    .expect("page two failed");

    assert_eq!(page_one.len(), 2);
    assert_eq!(page_two.len(), 1);
    assert_eq!(page_two[0].name, "Green Tea Cleanser");
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_products_newest_sort_orders_by_capture_time(pool: sqlx::PgPool) {
    // Insert with explicit timestamps to make the order deterministic.
    for (name, offset_mins) in [("Old Serum", 60), ("New Serum", 0)] {
        sqlx::query(
            "INSERT INTO products (name, price, store, image_url, category, link, scraped_at) \
             VALUES ($1, 100, 'X', 'https://img.example.com/i.jpg', 'Skincare', \
                     'https://x.example.com/p', NOW() - ($2 || ' minutes')::interval)",
        )
        .bind(name)
        .bind(offset_mins.to_string())
        .execute(&pool)
        .await
        .expect("seed insert failed");
    }

    let rows = list_products(
        &pool,
        ProductListFilters {
            sort: ProductSort::Newest,
            limit: 50,
            ..Default::default()
        },
    )
    .await
    .expect("list failed");

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["New Serum", "Old Serum"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn store_counts_group_by_store(pool: sqlx::PgPool) {
    seed_catalog(&pool).await;

    let counts = list_store_counts(&pool).await.expect("counts failed");
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].store, "Chicor");
    assert_eq!(counts[0].product_count, 1);
    assert_eq!(counts[1].store, "YesStyle");
    assert_eq!(counts[1].product_count, 2);
}
