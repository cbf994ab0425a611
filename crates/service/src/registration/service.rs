use std::sync::Arc;

use common::types::Coordinate;
use models::business::{self, NewBusiness};
use tracing::{error, info, instrument, warn};

use super::domain::{DocumentUpload, RegisterBusinessInput, RegistrationOutcome};
use super::errors::RegistrationError;
use super::repository::BusinessRepository;
use crate::geocoding::Geocoder;
use crate::media::MediaStore;
use crate::password;

const MIN_PASSWORD_LEN: usize = 8;

/// Registration business service independent of web framework
pub struct RegistrationService<R: BusinessRepository> {
    repo: Arc<R>,
    media: Arc<MediaStore>,
    geocoder: Arc<dyn Geocoder>,
}

impl<R: BusinessRepository> RegistrationService<R> {
    pub fn new(repo: Arc<R>, media: Arc<MediaStore>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { repo, media, geocoder }
    }

    /// Register a business with its document.
    ///
    /// Order of effects: validate, store document, hash password, constrained
    /// insert. If the insert conflicts or fails the stored document is removed
    /// again, so a rejected submission leaves no file behind.
    #[instrument(skip(self, input, document), fields(email = %input.email, name = %input.name))]
    pub async fn register(
        &self,
        input: RegisterBusinessInput,
        document: Option<DocumentUpload>,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        let document = match document {
            Some(doc) if !doc.bytes.is_empty() => doc,
            _ => return Err(RegistrationError::MissingDocument),
        };

        business::validate_name(&input.name)?;
        business::validate_email(&input.email)?;
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegistrationError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        if !self.repo.sub_category_belongs_to(input.sub_category_id, input.category_id).await? {
            return Err(RegistrationError::Validation(format!(
                "subcategory {} does not belong to category {}",
                input.sub_category_id, input.category_id
            )));
        }
        let coordinate = self.resolve_coordinate(&input).await?;

        let stored = self
            .media
            .save(&document.file_name, document.content_type.as_deref(), &document.bytes)
            .await?;

        let password_hash = match password::hash_password(&input.password).await {
            Ok(h) => h,
            Err(e) => {
                self.discard_document(&stored).await;
                return Err(e.into());
            }
        };

        let new = NewBusiness {
            name: input.name,
            email: input.email,
            password_hash,
            description: input.description,
            location: input.location,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            document: stored.clone(),
            category_id: input.category_id,
            sub_category_id: input.sub_category_id,
        };

        match self.repo.insert_unless_registered(new).await {
            Ok(Some(business_id)) => {
                info!(business_id, document = %stored, "business_registered");
                Ok(RegistrationOutcome::Registered { business_id, document: stored })
            }
            Ok(None) => {
                info!("business_already_registered");
                self.discard_document(&stored).await;
                Ok(RegistrationOutcome::AlreadyRegistered)
            }
            Err(e) => {
                self.discard_document(&stored).await;
                Err(e)
            }
        }
    }

    /// Use the submitted pair, or geocode the location when both are absent.
    async fn resolve_coordinate(&self, input: &RegisterBusinessInput) -> Result<Coordinate, RegistrationError> {
        match (input.latitude, input.longitude) {
            (Some(latitude), Some(longitude)) => {
                business::validate_coordinates(latitude, longitude)?;
                Ok(Coordinate { latitude, longitude })
            }
            (None, None) => {
                if input.location.trim().is_empty() {
                    return Err(RegistrationError::Validation("latitude/longitude or a location is required".into()));
                }
                match self.geocoder.geocode(&input.location).await {
                    Ok(Some(c)) if c.is_in_range() => Ok(c),
                    Ok(_) => Err(RegistrationError::Validation("location could not be geocoded".into())),
                    Err(e) => {
                        warn!(err = %e, "geocoding during registration failed");
                        Err(RegistrationError::Geocoding(e.to_string()))
                    }
                }
            }
            _ => Err(RegistrationError::Validation("latitude and longitude must be provided together".into())),
        }
    }

    async fn discard_document(&self, stored: &str) {
        if let Err(e) = self.media.remove(stored).await {
            error!(document = %stored, err = %e, "failed to remove document of rejected registration");
        }
    }
}
