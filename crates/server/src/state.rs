use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::{
    geocoding::Geocoder,
    media::MediaStore,
    registration::{repo::seaorm::SeaOrmBusinessRepository, RegistrationService},
    search::{CoordinateSumPlaceholder, SearchService},
};

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub registration: Arc<RegistrationService<SeaOrmBusinessRepository>>,
    pub search: Arc<SearchService>,
    pub geocoder: Arc<dyn Geocoder>,
    pub media: Arc<MediaStore>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, media: Arc<MediaStore>, geocoder: Arc<dyn Geocoder>) -> Self {
        let repo = Arc::new(SeaOrmBusinessRepository { db: db.clone() });
        let registration = Arc::new(RegistrationService::new(repo, Arc::clone(&media), Arc::clone(&geocoder)));
        let search = Arc::new(SearchService::new(db.clone(), Arc::new(CoordinateSumPlaceholder)));
        Self { db, registration, search, geocoder, media }
    }
}
