//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod bearer;
pub mod blogs;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::{ApiResult, json_error_handler};

/// Register every `/api/v1` handler on `cfg`.
///
/// `/blogs/stats` is registered ahead of `/blogs/{id}` so it is not parsed
/// as an identifier.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(blogs::list_blogs)
        .service(blogs::blog_stats)
        .service(blogs::get_blog)
        .service(blogs::create_blog)
        .service(blogs::update_blog)
        .service(blogs::replace_comments)
        .service(blogs::delete_blog)
        .service(users::register)
        .service(users::list_users)
        .service(users::login);
}
