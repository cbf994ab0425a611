use serde::{Deserialize, Serialize};

/// Business fields of a registration form. Coordinates are optional; when both
/// are absent the location string is geocoded.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterBusinessInput {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category_id: i32,
    pub sub_category_id: i32,
}

impl std::fmt::Debug for RegisterBusinessInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterBusinessInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("location", &self.location)
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("category_id", &self.category_id)
            .field("sub_category_id", &self.sub_category_id)
            .finish()
    }
}

/// Uploaded document (the business's visiting card).
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    Registered { business_id: i32, document: String },
    /// A business with the same email and name exists; nothing was written.
    AlreadyRegistered,
}
