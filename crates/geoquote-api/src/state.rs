use geoquote_core::locale::Catalog;
use geoquote_core::ports::{Geocoder, Router};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub geocoder: Arc<dyn Geocoder>,
    pub router: Arc<dyn Router>,
    pub catalog: Arc<dyn Catalog>,
}

impl AppState {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn Router>,
        catalog: Arc<dyn Catalog>,
    ) -> Self {
        Self {
            geocoder,
            router,
            catalog,
        }
    }
}
