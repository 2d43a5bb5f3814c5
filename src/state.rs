use crate::{db::OrmConn, store::ProductStore};

#[derive(Clone)]
pub struct AppState {
    pub store: ProductStore,
}

impl AppState {
    pub fn new(orm: OrmConn) -> Self {
        Self {
            store: ProductStore::new(orm),
        }
    }
}
