use serde::Deserialize;
use utoipa::IntoParams;

use crate::store::Page;

const MAX_LIMIT: u64 = 1000;

/// Optional paging for `GET /products`. With no `limit` every product is returned.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsQuery {
    /// Maximum number of products to return (1-1000)
    pub limit: Option<u64>,
    /// Number of products to skip
    pub offset: Option<u64>,
}

impl ListProductsQuery {
    pub fn page(&self) -> Page {
        Page {
            limit: self.limit.map(|limit| limit.clamp(1, MAX_LIMIT)),
            offset: self.offset,
        }
    }
}
