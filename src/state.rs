use crate::notification::{MailRouting, Notifier};
use crate::store::DocumentStore;
use actix_web::web;
use std::sync::Arc;

/// Dependencies shared by every request handler.
///
/// Each worker's `App` registers them as `web::Data`, so handlers extract
/// `web::Data<dyn DocumentStore>`, `web::Data<dyn Notifier>` and
/// `web::Data<MailRouting>` directly.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub notifier: Arc<dyn Notifier>,
    pub routing: MailRouting,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        notifier: Arc<dyn Notifier>,
        routing: MailRouting,
    ) -> Self {
        Self {
            store,
            notifier,
            routing,
        }
    }

    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.store.clone()))
            .app_data(web::Data::from(self.notifier.clone()))
            .app_data(web::Data::new(self.routing.clone()));
    }
}
