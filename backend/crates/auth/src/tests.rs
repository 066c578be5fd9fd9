//! Cross-layer tests for the auth crate
//!
//! Repository semantics, use cases and the HTTP surface, all backed by the
//! in-memory repository.

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::application::config::AuthConfig;
    use crate::application::token::TokenService;
    use crate::infra::memory::MemoryUserRepository;

    pub const SECRET: &[u8] = b"auth-crate-test-secret-0123456789";

    pub fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig {
            token_secret: SECRET.to_vec(),
            ..Default::default()
        })
    }

    pub fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(SECRET, Duration::from_secs(300)).unwrap())
    }

    pub fn repo() -> Arc<MemoryUserRepository> {
        Arc::new(MemoryUserRepository::new())
    }
}

#[cfg(test)]
mod repository_tests {
    use kernel::id::UserId;

    use crate::domain::entity::user::NewUser;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::user_name::UserName;
    use crate::domain::value_object::user_password::{RawPassword, UserPassword};
    use crate::error::AuthError;
    use crate::infra::memory::MemoryUserRepository;

    fn new_user(name: &str) -> NewUser {
        let raw = RawPassword::new("pw".into()).unwrap();
        NewUser::new(
            UserName::new(name).unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = MemoryUserRepository::new();
        let a = repo.create(new_user("alice")).await.unwrap();
        let b = repo.create(new_user("bob")).await.unwrap();

        assert_eq!(a.user_id, UserId::new(1));
        assert_eq!(b.user_id, UserId::new(2));
    }

    #[tokio::test]
    async fn test_duplicate_active_name_rejected() {
        let repo = MemoryUserRepository::new();
        repo.create(new_user("alice")).await.unwrap();

        assert!(matches!(
            repo.create(new_user("alice")).await,
            Err(AuthError::UserNameTaken)
        ));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_row_and_frees_name() {
        let repo = MemoryUserRepository::new();
        let name = UserName::new("alice").unwrap();
        let first = repo.create(new_user("alice")).await.unwrap();

        assert!(repo.soft_delete(&name).await.unwrap());
        assert!(!repo.soft_delete(&name).await.unwrap());
        assert!(repo.find_by_user_name(&name).await.unwrap().is_none());
        assert!(!repo.exists_by_user_name(&name).await.unwrap());

        let second = repo.create(new_user("alice")).await.unwrap();
        assert_ne!(first.user_id, second.user_id);
    }

    #[tokio::test]
    async fn test_update_of_deleted_user_reports_no_match() {
        let repo = MemoryUserRepository::new();
        let mut user = repo.create(new_user("alice")).await.unwrap();
        repo.soft_delete(&user.user_name).await.unwrap();

        user.height = Some("180".into());
        assert!(!repo.update(&user).await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = MemoryUserRepository::new();
        let clone = repo.clone();
        repo.create(new_user("alice")).await.unwrap();

        let name = UserName::new("alice").unwrap();
        assert!(clone.exists_by_user_name(&name).await.unwrap());
    }
}

#[cfg(test)]
mod use_case_tests {
    use super::support;
    use crate::application::{
        AuthenticateInput, AuthenticateUseCase, DeleteUserUseCase, GetUserUseCase, RegisterInput,
        RegisterUseCase, UpdateUserInput, UpdateUserUseCase,
    };
    use crate::domain::value_object::user_name::UserName;
    use crate::error::AuthError;

    fn register_input(name: &str, password: &str) -> RegisterInput {
        RegisterInput {
            user_name: name.into(),
            password: password.into(),
            birth_date: Some("1990-01-01".into()),
            height: Some("".into()),
        }
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let repo = support::repo();
        let tokens = support::tokens();
        let config = support::config();

        let user = RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("alice", "s3cret"))
            .await
            .unwrap();
        assert_eq!(user.birth_date.as_deref(), Some("1990-01-01"));
        assert!(user.height.is_none());

        let output = AuthenticateUseCase::new(repo, tokens.clone(), config)
            .execute(AuthenticateInput {
                user_name: "alice".into(),
                password: "s3cret".into(),
            })
            .await
            .unwrap();

        assert_eq!(
            tokens.validate(&output.token).unwrap(),
            UserName::new("alice").unwrap()
        );
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let use_case = RegisterUseCase::new(support::repo(), support::config());

        assert!(matches!(
            use_case.execute(register_input(" ", "pw")).await,
            Err(AuthError::MissingField("username"))
        ));
        assert!(matches!(
            use_case.execute(register_input("alice", "")).await,
            Err(AuthError::MissingField("password"))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_failures() {
        let repo = support::repo();
        let config = support::config();
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("alice", "right"))
            .await
            .unwrap();

        let use_case = AuthenticateUseCase::new(repo, support::tokens(), config);

        let unknown = use_case
            .execute(AuthenticateInput {
                user_name: "bob".into(),
                password: "right".into(),
            })
            .await;
        assert!(matches!(unknown, Err(AuthError::UserNotFound)));

        let wrong = use_case
            .execute(AuthenticateInput {
                user_name: "alice".into(),
                password: "wrong".into(),
            })
            .await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_update_merges_and_rehashes() {
        let repo = support::repo();
        let config = support::config();
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("alice", "old-password"))
            .await
            .unwrap();
        let name = UserName::new("alice").unwrap();

        UpdateUserUseCase::new(repo.clone(), config.clone())
            .execute(
                &name,
                UpdateUserInput {
                    height: Some("175".into()),
                    password: Some("new-password".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let user = GetUserUseCase::new(repo.clone()).execute(&name).await.unwrap();
        assert_eq!(user.birth_date.as_deref(), Some("1990-01-01"));
        assert_eq!(user.height.as_deref(), Some("175"));

        let login = AuthenticateUseCase::new(repo, support::tokens(), config);
        assert!(
            login
                .execute(AuthenticateInput {
                    user_name: "alice".into(),
                    password: "new-password".into(),
                })
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_update_without_changes_succeeds() {
        let repo = support::repo();
        let config = support::config();
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(register_input("alice", "pw"))
            .await
            .unwrap();

        let result = UpdateUserUseCase::new(repo, config)
            .execute(&UserName::new("alice").unwrap(), UpdateUserInput::default())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_then_lookup_and_reregister() {
        let repo = support::repo();
        let config = support::config();
        let register = RegisterUseCase::new(repo.clone(), config.clone());
        register.execute(register_input("alice", "pw")).await.unwrap();
        let name = UserName::new("alice").unwrap();

        DeleteUserUseCase::new(repo.clone()).execute(&name).await.unwrap();

        assert!(matches!(
            GetUserUseCase::new(repo.clone()).execute(&name).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            DeleteUserUseCase::new(repo.clone()).execute(&name).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(register.execute(register_input("alice", "pw")).await.is_ok());
    }
}

#[cfg(test)]
mod http_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support;
    use crate::presentation::dto::{TokenResponse, UserResponse};
    use crate::presentation::router::auth_router;

    fn app() -> Router {
        auth_router(support::repo(), support::tokens(), support::config())
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register_and_login(app: &Router, name: &str) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/register",
                None,
                json!({"username": name, "password": "pw-123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/login",
                None,
                json!({"username": name, "password": "pw-123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let token: TokenResponse = serde_json::from_value(body_json(response).await).unwrap();
        token.token
    }

    #[tokio::test]
    async fn test_register_returns_user_without_hash() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/auth/register",
                None,
                json!({"username": "alice", "password": "pw", "birth_date": "1990-01-01"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["username"], "alice");
        assert_eq!(body["birth_date"], "1990-01-01");
        assert!(body.get("height").is_none());
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let app = app();
        let body = json!({"username": "alice", "password": "pw"});

        let first = app
            .clone()
            .oneshot(json_request("POST", "/auth/register", None, body.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .oneshot(json_request("POST", "/auth/register", None, body))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(
            body_json(second).await["message"],
            "User with this username already exists"
        );
    }

    #[tokio::test]
    async fn test_register_missing_field() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/auth/register",
                None,
                json!({"password": "pw"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "field username is required");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid request body");
        assert!(body["developer_message"].is_string());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = app();
        register_and_login(&app, "alice").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/auth/login",
                None,
                json!({"username": "alice", "password": "nope"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Invalid login or password!");
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/auth/login",
                None,
                json!({"username": "ghost", "password": "pw"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "User not found");
    }

    #[tokio::test]
    async fn test_profile_requires_token() {
        let app = app();

        let missing = app.clone().oneshot(bare_request("GET", "/users", None)).await.unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(missing).await["message"],
            "missing authorization header"
        );

        let bogus = app
            .oneshot(bare_request("GET", "/users", Some("bogus")))
            .await
            .unwrap();
        assert_eq!(bogus.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(bogus).await["message"], "invalid token");
    }

    #[tokio::test]
    async fn test_profile_read_update_delete() {
        let app = app();
        let token = register_and_login(&app, "alice").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/users",
                Some(&token),
                json!({"username": "mallory", "height": "180"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(bare_request("GET", "/users", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let user: UserResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.height.as_deref(), Some("180"));

        let response = app
            .clone()
            .oneshot(bare_request("DELETE", "/users", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Token still verifies, but the account is gone
        let response = app
            .clone()
            .oneshot(bare_request("GET", "/users", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(json_request(
                "POST",
                "/auth/register",
                None,
                json!({"username": "alice", "password": "pw-123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
