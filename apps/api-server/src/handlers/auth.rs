//! Authentication handlers.
//!
//! Thin adapters: validate the payload, run the auth flow, attach or clear
//! the refresh-token cookie, serialize the outcome.

use actix_web::{HttpRequest, HttpResponse, web};

use storefront_core::domain::UserWithRelations;
use storefront_core::service::{AuthOutcome, Credentials, OAuthProfile};
use storefront_shared::dto::{
    AuthRequest, AuthResponse, FavoriteDto, OAuthProfileRequest, OrderDto, StoreDto, UserDto,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::session::REFRESH_TOKEN_COOKIE;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<AuthRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(|e| AppError::BadRequest(e.join(", ")))?;

    let outcome = state
        .auth
        .register(Credentials {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;

    let cookie = state.cookies.refresh_cookie(&outcome.refresh_token);
    Ok(HttpResponse::Created()
        .cookie(cookie)
        .json(auth_response(outcome)))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<AuthRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(|e| AppError::BadRequest(e.join(", ")))?;

    let outcome = state
        .auth
        .login(Credentials {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;

    let cookie = state.cookies.refresh_cookie(&outcome.refresh_token);
    Ok(HttpResponse::Ok().cookie(cookie).json(auth_response(outcome)))
}

/// POST /api/auth/login/access-token
///
/// Exchanges the refresh token carried by the session cookie for a fresh
/// token pair, rotating the cookie.
pub async fn refresh(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let cookie = req
        .cookie(REFRESH_TOKEN_COOKIE)
        .ok_or(AppError::Unauthorized)?;

    let outcome = state.auth.refresh(cookie.value()).await?;

    let cookie = state.cookies.refresh_cookie(&outcome.refresh_token);
    Ok(HttpResponse::Ok().cookie(cookie).json(auth_response(outcome)))
}

/// POST /api/auth/logout
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.cookies.clear_cookie())
        .json(serde_json::json!({ "message": "Logged out" }))
}

/// POST /api/auth/oauth
///
/// Accepts a profile already verified by the identity-provider SDK and
/// logs it in, creating the account on first contact.
pub async fn oauth_login(
    state: web::Data<AppState>,
    body: web::Json<OAuthProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate().map_err(|e| AppError::BadRequest(e.join(", ")))?;

    let outcome = state
        .auth
        .oauth_login(OAuthProfile {
            email: req.email,
            name: req.name,
            picture: req.picture,
        })
        .await?;

    let cookie = state.cookies.refresh_cookie(&outcome.refresh_token);
    Ok(HttpResponse::Ok().cookie(cookie).json(auth_response(outcome)))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found!".to_string()))?;

    Ok(HttpResponse::Ok().json(user_dto(user)))
}

fn auth_response(outcome: AuthOutcome) -> AuthResponse {
    AuthResponse {
        user: user_dto(outcome.user),
        access_token: outcome.access_token,
        refresh_token: outcome.refresh_token,
    }
}

/// The DTO never carries the password hash.
fn user_dto(found: UserWithRelations) -> UserDto {
    UserDto {
        id: found.user.id,
        email: found.user.email,
        name: found.user.name,
        picture: found.user.picture,
        created_at: found.user.created_at,
        favorites: found
            .favorites
            .into_iter()
            .map(|f| FavoriteDto {
                id: f.id,
                product_id: f.product_id,
            })
            .collect(),
        orders: found
            .orders
            .into_iter()
            .map(|o| OrderDto {
                id: o.id,
                total_cents: o.total_cents,
                status: o.status,
            })
            .collect(),
        stores: found
            .stores
            .into_iter()
            .map(|s| StoreDto {
                id: s.id,
                title: s.title,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test, web};

    use storefront_core::ports::{PasswordService, TokenService, UserRepository};
    use storefront_core::service::AuthService;
    use storefront_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

    use crate::handlers::configure_routes;
    use crate::session::{CookieConfig, SessionCookieManager};
    use crate::state::{AppState, InMemoryUserRepository};

    fn test_state() -> AppState {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository);
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            ..JwtConfig::default()
        }));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        AppState {
            auth: AuthService::new(users.clone(), passwords, tokens.clone()),
            users,
            tokens,
            cookies: SessionCookieManager::new(CookieConfig { domain: None }),
        }
    }

    macro_rules! test_app {
        () => {{
            let state = test_state();
            let tokens = state.tokens.clone();
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .app_data(web::Data::new(tokens))
                    .configure(configure_routes),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn register_sets_the_refresh_cookie() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({
                "email": "a@x.com",
                "password": "secret1"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "refreshtoken")
            .expect("refresh cookie missing");
        assert!(!cookie.value().is_empty());
    }

    #[actix_web::test]
    async fn register_rejects_short_password() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({
                "email": "a@x.com",
                "password": "short"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn refresh_without_cookie_is_unauthorized() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/api/auth/login/access-token")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_clears_the_cookie() {
        let app = test_app!();

        let req = test::TestRequest::post().uri("/api/auth/logout").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "refreshtoken")
            .expect("clearing cookie missing");
        assert_eq!(cookie.value(), "");
    }

    #[actix_web::test]
    async fn me_requires_a_bearer_token() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/api/auth/me").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
