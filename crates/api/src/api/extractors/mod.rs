//! Custom extractors that reject with `AppError` instead of axum's defaults.

mod bearer;
mod query;
mod validated_json;

pub use bearer::{bearer_token, BearerToken};
pub use query::QueryParams;
pub use validated_json::ValidatedJson;
