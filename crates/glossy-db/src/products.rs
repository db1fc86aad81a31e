//! Database operations for the `products` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use glossy_core::ScrapedProduct;

use crate::DbError;

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub store: String,
    pub image_url: String,
    pub category: String,
    pub link: String,
    pub scraped_at: DateTime<Utc>,
}

/// Result of one idempotent insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A row with the same `(name, store)` already exists; first write wins.
    DuplicateSkipped,
}

/// Inserts a scraped product, ignoring the write when `(name, store)` is
/// already present.
///
/// The scrape-time `f64` price is bound as `FLOAT8` and cast to the
/// fixed-scale `NUMERIC(10,2)` column by the database engine — the documented
/// precision boundary where values are rounded on persistence.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails for any reason other than
/// the expected duplicate-key no-op.
pub async fn insert_product(
    pool: &PgPool,
    product: &ScrapedProduct,
) -> Result<InsertOutcome, DbError> {
    let rows_affected = sqlx::query(
        "INSERT INTO products (name, price, store, image_url, category, link) \
         VALUES ($1, $2::numeric(10,2), $3, $4, $5, $6) \
         ON CONFLICT (name, store) DO NOTHING",
    )
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.store)
    .bind(&product.image_url)
    .bind(&product.category)
    .bind(&product.link)
    .execute(pool)
    .await?
    .rows_affected();

    if rows_affected > 0 {
        Ok(InsertOutcome::Inserted)
    } else {
        Ok(InsertOutcome::DuplicateSkipped)
    }
}

/// Sort orders exposed by the read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Cheapest first.
    #[default]
    PriceAsc,
    /// Most recently captured first.
    Newest,
}

/// Optional filters for [`list_products`]. `limit`/`offset` are applied
/// verbatim; callers clamp them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductListFilters<'a> {
    /// Case-insensitive substring match on `name`.
    pub search: Option<&'a str>,
    pub store: Option<&'a str>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: i64,
    pub offset: i64,
    pub sort: ProductSort,
}

/// Lists products matching the filters, paginated and ordered.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products(
    pool: &PgPool,
    filters: ProductListFilters<'_>,
) -> Result<Vec<ProductRow>, DbError> {
    let order_by = match filters.sort {
        ProductSort::PriceAsc => "price ASC, id ASC",
        ProductSort::Newest => "scraped_at DESC, id DESC",
    };

    let sql = format!(
        "SELECT id, name, price, store, image_url, category, link, scraped_at \
         FROM products \
         WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%') \
           AND ($2::text IS NULL OR store = $2) \
           AND ($3::float8 IS NULL OR price >= $3::numeric(10,2)) \
           AND ($4::float8 IS NULL OR price <= $4::numeric(10,2)) \
         ORDER BY {order_by} \
         LIMIT $5 OFFSET $6"
    );

    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(filters.search)
        .bind(filters.store)
        .bind(filters.min_price)
        .bind(filters.max_price)
        .bind(filters.limit)
        .bind(filters.offset)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// One row per distinct store with its product count, for the frontend's
/// store filter widget.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreCount {
    pub store: String,
    pub product_count: i64,
}

/// Lists distinct stores and their product counts, alphabetically.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_store_counts(pool: &PgPool) -> Result<Vec<StoreCount>, DbError> {
    let rows = sqlx::query_as::<_, StoreCount>(
        "SELECT store, COUNT(*) AS product_count \
         FROM products \
         GROUP BY store \
         ORDER BY store ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
