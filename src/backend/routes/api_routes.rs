/**
 * API Route Configuration
 *
 * Routes are split into two tables:
 *
 * - **public** - paths that anyone may call, and paths that mix public and
 *   protected methods (advertisement listing vs. creation). Handlers on
 *   the protected methods of these paths take `AuthUser`, which
 *   authenticates the request itself.
 * - **protected** - paths where every method needs a signed-in user. The
 *   router wraps this table in `auth_middleware`, so a missing or invalid
 *   token is rejected with 401 before any handler runs.
 *
 * Admin handlers additionally take `AdminUser` (403 for non-admins).
 */

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::server::state::AppState;
use crate::backend::{admin, advertisements, auth, export, favorites, offers, problems};

/// Routes reachable without a token
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        // Lookup lists
        .route("/api/positions", get(advertisements::list_positions))
        .route("/api/preferred-feet", get(advertisements::list_preferred_feet))
        .route("/api/offer-statuses", get(offers::list_offer_statuses))
        // Player advertisements
        .route(
            "/api/player-advertisements",
            get(advertisements::list_player_advertisements)
                .post(advertisements::create_player_advertisement),
        )
        .route(
            "/api/player-advertisements/{id}",
            get(advertisements::get_player_advertisement)
                .put(advertisements::update_player_advertisement)
                .delete(advertisements::delete_player_advertisement),
        )
        // Club advertisements
        .route(
            "/api/club-advertisements",
            get(advertisements::list_club_advertisements)
                .post(advertisements::create_club_advertisement),
        )
        .route(
            "/api/club-advertisements/{id}",
            get(advertisements::get_club_advertisement)
                .put(advertisements::update_club_advertisement)
                .delete(advertisements::delete_club_advertisement),
        )
}

/// Routes that require a valid token on every method
pub fn configure_protected_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Account
        .route("/api/auth/me", get(auth::get_me))
        .route("/api/users/me", put(auth::update_me))
        .route("/api/users/me/password", put(auth::change_password))
        .route("/api/users/{id}", get(auth::get_user_profile))
        .route(
            "/api/users/me/player-advertisements",
            get(advertisements::my_player_advertisements),
        )
        .route(
            "/api/users/me/club-advertisements",
            get(advertisements::my_club_advertisements),
        )
        .route("/api/users/me/export/offers.csv", get(export::export_my_offers))
        // Player offers
        .route("/api/player-offers", post(offers::create_player_offer))
        .route("/api/player-offers/received", get(offers::received_player_offers))
        .route("/api/player-offers/sent", get(offers::sent_player_offers))
        .route("/api/player-offers/{id}", delete(offers::withdraw_player_offer))
        .route("/api/player-offers/{id}/accept", put(offers::accept_player_offer))
        .route("/api/player-offers/{id}/reject", put(offers::reject_player_offer))
        // Club offers
        .route("/api/club-offers", post(offers::create_club_offer))
        .route("/api/club-offers/received", get(offers::received_club_offers))
        .route("/api/club-offers/sent", get(offers::sent_club_offers))
        .route("/api/club-offers/{id}", delete(offers::withdraw_club_offer))
        .route("/api/club-offers/{id}/accept", put(offers::accept_club_offer))
        .route("/api/club-offers/{id}/reject", put(offers::reject_club_offer))
        // Favorites
        .route(
            "/api/favorites/player-advertisements",
            get(favorites::list_favorite_player_advertisements),
        )
        .route(
            "/api/favorites/player-advertisements/{id}",
            post(favorites::add_favorite_player_advertisement)
                .delete(favorites::remove_favorite_player_advertisement),
        )
        .route(
            "/api/favorites/player-advertisements/{id}/exists",
            get(favorites::favorite_player_advertisement_exists),
        )
        .route(
            "/api/favorites/club-advertisements",
            get(favorites::list_favorite_club_advertisements),
        )
        .route(
            "/api/favorites/club-advertisements/{id}",
            post(favorites::add_favorite_club_advertisement)
                .delete(favorites::remove_favorite_club_advertisement),
        )
        .route(
            "/api/favorites/club-advertisements/{id}/exists",
            get(favorites::favorite_club_advertisement_exists),
        )
        // Problems
        .route(
            "/api/problems",
            get(problems::list_problems).post(problems::create_problem),
        )
        .route("/api/problems/mine", get(problems::my_problems))
        .route("/api/problems/unsolved/count", get(problems::unsolved_count))
        .route("/api/problems/{id}/solve", put(problems::solve_problem))
        // Administration
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/users/{id}", delete(admin::delete_user))
        .route("/api/admin/users/{id}/role", put(admin::set_user_role))
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/admin/export/users.csv", get(export::export_users))
        .route(
            "/api/admin/export/player-advertisements.csv",
            get(export::export_player_advertisements),
        )
        .route(
            "/api/admin/export/club-advertisements.csv",
            get(export::export_club_advertisements),
        )
        .route("/api/admin/export/problems.csv", get(export::export_problems))
}
