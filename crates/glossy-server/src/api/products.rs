use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use glossy_db::{ProductListFilters, ProductSort};

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, normalize_offset, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ProductItem {
    pub(super) id: i64,
    pub(super) name: String,
    pub(super) price: Decimal,
    pub(super) store: String,
    pub(super) image_url: String,
    pub(super) category: String,
    pub(super) link: String,
    pub(super) scraped_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProductQuery {
    pub search: Option<String>,
    pub store: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

fn parse_sort(raw: Option<&str>) -> Result<ProductSort, String> {
    match raw {
        None | Some("price_asc") => Ok(ProductSort::PriceAsc),
        Some("newest") => Ok(ProductSort::Newest),
        Some(other) => Err(format!(
            "unknown sort \"{other}\"; expected \"price_asc\" or \"newest\""
        )),
    }
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ApiResponse<Vec<ProductItem>>>, ApiError> {
    let sort = parse_sort(query.sort.as_deref())
        .map_err(|message| ApiError::new(req_id.0.clone(), "validation_error", message))?;

    let rows = glossy_db::list_products(
        &state.pool,
        ProductListFilters {
            search: query.search.as_deref(),
            store: query.store.as_deref(),
            min_price: query.min_price,
            max_price: query.max_price,
            limit: normalize_limit(query.limit),
            offset: normalize_offset(query.offset),
            sort,
        },
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| ProductItem {
            id: row.id,
            name: row.name,
            price: row.price,
            store: row.store,
            image_url: row.image_url,
            category: row.category,
            link: row.link,
            scraped_at: row.scraped_at,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Serialize)]
pub(super) struct StoreItem {
    store: String,
    product_count: i64,
}

pub(super) async fn list_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<StoreItem>>>, ApiError> {
    let rows = glossy_db::list_store_counts(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| StoreItem {
            store: row.store,
            product_count: row.product_count,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_defaults_to_price_ascending() {
        assert_eq!(parse_sort(None).unwrap(), ProductSort::PriceAsc);
        assert_eq!(parse_sort(Some("price_asc")).unwrap(), ProductSort::PriceAsc);
    }

    #[test]
    fn sort_newest_maps_to_capture_time_descending() {
        assert_eq!(parse_sort(Some("newest")).unwrap(), ProductSort::Newest);
    }

    #[test]
    fn sort_rejects_unknown_values() {
        let err = parse_sort(Some("sideways")).unwrap_err();
        assert!(err.contains("sideways"));
    }
}
