use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

/// Normalized paging window. Query DTOs carry `page`/`per_page` inline and
/// funnel them here; `serde(flatten)` cannot deserialize numeric fields
/// through `axum::extract::Query`.
#[derive(Debug, Default)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CarSortBy {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl CarSortBy {
    /// Sort tokens come straight from the query string; anything
    /// unrecognized falls back to newest-first rather than erroring.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("priceAsc") => Self::PriceAsc,
            Some("priceDesc") => Self::PriceDesc,
            _ => Self::Newest,
        }
    }
}

/// Public car listing filters. This is the closed set of recognized options;
/// unknown query keys are dropped by deserialization and impose no
/// constraint.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarListQuery {
    pub page: Option<i64>,
    #[serde(rename = "per_page")]
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub brand: Option<String>,
    pub body_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
    pub sort_by: Option<String>,
}

impl CarListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Admin inventory search: free text over brand, model and color.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AdminCarQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
}

impl AdminCarQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookingListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl BookingListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    #[test]
    fn unknown_sort_token_falls_back_to_newest() {
        assert_eq!(CarSortBy::from_param(Some("priceAsc")), CarSortBy::PriceAsc);
        assert_eq!(
            CarSortBy::from_param(Some("priceDesc")),
            CarSortBy::PriceDesc
        );
        assert_eq!(CarSortBy::from_param(Some("oldest")), CarSortBy::Newest);
        assert_eq!(CarSortBy::from_param(None), CarSortBy::Newest);
    }

    #[test]
    fn pagination_clamps_bounds() {
        let (page, per_page, offset) = Pagination {
            page: Some(-3),
            per_page: Some(1_000),
        }
        .normalize();
        assert_eq!((page, per_page, offset), (1, 100, 0));

        let (page, per_page, offset) = Pagination::default().normalize();
        assert_eq!((page, per_page, offset), (1, 20, 0));
    }

    #[test]
    fn paginated_listing_uri_deserializes() {
        let uri: Uri = "/api/cars?page=2&per_page=5".parse().unwrap();
        let Query(query) = Query::<CarListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.page, Some(2));
        assert_eq!(query.per_page, Some(5));
        assert_eq!(query.pagination().normalize(), (2, 5, 5));
    }

    #[test]
    fn filters_and_pagination_combine_in_one_uri() {
        let uri: Uri =
            "/api/cars?search=corolla&minPrice=1000&maxPrice=25000&sortBy=priceAsc&page=1&per_page=10"
                .parse()
                .unwrap();
        let Query(query) = Query::<CarListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.search.as_deref(), Some("corolla"));
        assert_eq!(query.min_price, Some(Decimal::new(1000, 0)));
        assert_eq!(query.max_price, Some(Decimal::new(25000, 0)));
        assert_eq!(query.sort_by.as_deref(), Some("priceAsc"));
        assert_eq!(query.pagination().normalize(), (1, 10, 0));
    }

    #[test]
    fn paginated_admin_uris_deserialize() {
        let uri: Uri = "/api/admin/cars?search=red&page=2&per_page=25"
            .parse()
            .unwrap();
        let Query(query) = Query::<AdminCarQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.search.as_deref(), Some("red"));
        assert_eq!(query.pagination().normalize(), (2, 25, 25));

        let uri: Uri = "/api/admin/test-drives?status=PENDING&page=3&per_page=2"
            .parse()
            .unwrap();
        let Query(query) = Query::<BookingListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.status.as_deref(), Some("PENDING"));
        assert_eq!(query.pagination().normalize(), (3, 2, 4));
    }

    #[test]
    fn unknown_query_keys_are_ignored() {
        let uri: Uri = "/api/cars?color=red&page=1".parse().unwrap();
        let Query(query) = Query::<CarListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.page, Some(1));
        assert!(query.brand.is_none());
    }
}
