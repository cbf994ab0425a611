use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CoordinateDoc { pub latitude: f64, pub longitude: f64 }

#[derive(ToSchema)]
pub struct CatalogEntryDoc { pub id: i32, pub name: String }

#[derive(ToSchema)]
pub struct BusinessSearchResultDoc {
    pub business_id: i32,
    pub name: String,
    pub description: String,
    /// Placeholder value: latitude + longitude
    pub distance: f64,
    pub document: String,
}

/// Multipart fields of a registration. Latitude and longitude may be omitted
/// together, in which case `location` is geocoded.
#[derive(ToSchema)]
pub struct RegisterBusinessForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category_id: i32,
    pub sub_category_id: i32,
    #[schema(value_type = String, format = Binary)]
    pub document: Vec<u8>,
}

#[derive(ToSchema)]
pub struct RegisterResponseDoc { pub message: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::geocode::geocode,
        crate::routes::media::get_image,
        crate::routes::business::register,
        crate::routes::catalog::get_categories,
        crate::routes::catalog::get_sub_categories,
        crate::routes::search::search,
    ),
    components(
        schemas(
            HealthResponse,
            CoordinateDoc,
            CatalogEntryDoc,
            BusinessSearchResultDoc,
            RegisterBusinessForm,
            RegisterResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "geocode"),
        (name = "media"),
        (name = "business"),
        (name = "catalog"),
        (name = "search")
    )
)]
pub struct ApiDoc;
