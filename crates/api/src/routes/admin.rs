//! Route definitions for the employee back office under `/admin`.
//!
//! Every handler mounted here extracts [`RequireEmployee`], so anonymous
//! callers get 401 and customers get 403.
//!
//! [`RequireEmployee`]: crate::middleware::rbac::RequireEmployee

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{
    association, auth, contract, dashboard, episode, producer, production_house, reference,
    schedule, series,
};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /dashboard                          -> dashboard::get
/// POST   /employees                          -> auth::create_employee
///
/// GET    /series                             -> series::list
/// POST   /series                             -> series::create
/// GET    /series/{id}                        -> series::get_by_id
/// PUT    /series/{id}                        -> series::update
/// DELETE /series/{id}                        -> series::delete
/// GET    /series/{id}/episodes               -> episode::list_by_series
/// POST   /series/{id}/episodes               -> episode::create
///
/// PUT    /episodes/{id}                      -> episode::update
/// DELETE /episodes/{id}                      -> episode::delete
/// POST   /episodes/{id}/viewers              -> episode::record_viewers
/// GET    /episodes/{id}/schedules            -> schedule::list_by_episode
/// POST   /episodes/{id}/schedules            -> schedule::create
/// DELETE /schedules/{id}                     -> schedule::delete
///
/// GET    /production-houses                  -> production_house::list
/// POST   /production-houses                  -> production_house::create
/// GET    /production-houses/{id}             -> production_house::get_by_id
/// PUT    /production-houses/{id}             -> production_house::update
/// DELETE /production-houses/{id}             -> production_house::delete
///
/// GET    /producers                          -> producer::list
/// POST   /producers                          -> producer::create
/// GET    /producers/{id}                     -> producer::get_by_id
/// PUT    /producers/{id}                     -> producer::update
/// DELETE /producers/{id}                     -> producer::delete
///
/// GET    /contracts                          -> contract::list
/// POST   /contracts                          -> contract::create
/// GET    /contracts/{id}                     -> contract::get_by_id
/// PUT    /contracts/{id}                     -> contract::update
/// DELETE /contracts/{id}                     -> contract::delete
///
/// GET    /associations                       -> association::list
/// POST   /associations                       -> association::create
/// DELETE /associations/{producer_id}/{house_id} -> association::delete
///
/// POST   /reference/{kind}                   -> reference::create
/// DELETE /reference/{kind}/{id}              -> reference::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::get))
        .route("/employees", post(auth::create_employee))
        // Series and their episodes.
        .route("/series", get(series::list).post(series::create))
        .route(
            "/series/{id}",
            get(series::get_by_id)
                .put(series::update)
                .delete(series::delete),
        )
        .route(
            "/series/{id}/episodes",
            get(episode::list_by_series).post(episode::create),
        )
        .route(
            "/episodes/{id}",
            put(episode::update).delete(episode::delete),
        )
        .route("/episodes/{id}/viewers", post(episode::record_viewers))
        .route(
            "/episodes/{id}/schedules",
            get(schedule::list_by_episode).post(schedule::create),
        )
        .route("/schedules/{id}", delete(schedule::delete))
        // Production side.
        .route(
            "/production-houses",
            get(production_house::list).post(production_house::create),
        )
        .route(
            "/production-houses/{id}",
            get(production_house::get_by_id)
                .put(production_house::update)
                .delete(production_house::delete),
        )
        .route("/producers", get(producer::list).post(producer::create))
        .route(
            "/producers/{id}",
            get(producer::get_by_id)
                .put(producer::update)
                .delete(producer::delete),
        )
        .route("/contracts", get(contract::list).post(contract::create))
        .route(
            "/contracts/{id}",
            get(contract::get_by_id)
                .put(contract::update)
                .delete(contract::delete),
        )
        .route(
            "/associations",
            get(association::list).post(association::create),
        )
        .route(
            "/associations/{producer_id}/{house_id}",
            delete(association::delete),
        )
        // Reference vocabularies.
        .route("/reference/{kind}", post(reference::create))
        .route("/reference/{kind}/{id}", delete(reference::delete))
}
