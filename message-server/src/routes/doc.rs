use crate::routes::{health, messages};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "message-server",
    description = "Store, search and delete short text messages",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(messages::MessagesApi::openapi());
    root
}
