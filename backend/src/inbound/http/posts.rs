//! Post handlers: create, list, and fetch one.
//!
//! All routes here sit behind the [`AuthenticatedUser`] guard; the
//! unauthenticated branches answer an explicit `401` JSON error rather than
//! hanging the request.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Error, ImageUpload, PostDraft, PostId, PostRecord, PostValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{FormDescriptor, ImageUploadRequest};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Post-creation request body for `POST /api/v1/posts/create`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: Option<String>,
    pub pic_name: Option<String>,
    pub image: Option<ImageUploadRequest>,
}

fn map_post_validation_error(err: PostValidationError) -> Error {
    match err {
        PostValidationError::MissingContent => Error::invalid_request(err.to_string())
            .with_details(json!({ "code": "missing_content", "field": "content" })),
        PostValidationError::InvalidId => Error::not_found("post not found"),
    }
}

/// Describe the post form.
#[utoipa::path(
    get,
    path = "/api/v1/posts/create",
    responses(
        (status = 200, description = "Post form descriptor", body = FormDescriptor),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["posts"],
    operation_id = "postForm"
)]
#[get("/posts/create")]
pub async fn post_form(_user: AuthenticatedUser) -> web::Json<FormDescriptor> {
    web::Json(FormDescriptor::post())
}

/// Create a post for the session user.
#[utoipa::path(
    post,
    path = "/api/v1/posts/create",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostRecord),
        (status = 400, description = "Missing content or invalid image", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts/create")]
pub async fn create_post(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreatePostRequest>,
) -> ApiResult<HttpResponse> {
    let CreatePostRequest {
        content,
        pic_name,
        image,
    } = payload.into_inner();
    let image = image.map(ImageUpload::try_from).transpose()?;
    let draft = PostDraft::try_from_parts(content.as_deref().unwrap_or_default(), pic_name, image)
        .map_err(map_post_validation_error)?;

    let post = state.posts.create(&user.0, draft).await?;
    Ok(HttpResponse::Created().json(PostRecord::from(&post)))
}

/// List all posts in creation order.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    responses(
        (status = 200, description = "All posts, oldest first", body = [PostRecord]),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<PostRecord>>> {
    let posts = state.posts.list().await?;
    Ok(web::Json(posts.iter().map(PostRecord::from).collect()))
}

/// Fetch a single post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "The post", body = PostRecord),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No post with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostRecord>> {
    // A non-UUID id cannot match a stored post.
    let id = PostId::new(path.into_inner()).map_err(map_post_validation_error)?;
    let post = state.posts.get(&id).await?;
    Ok(web::Json(PostRecord::from(&post)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::auth::{login, signup};
    use crate::inbound::http::test_utils::{TestHarness, test_harness};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::Value;

    fn test_app(
        harness: &TestHarness,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
                actix_web::dev::ServiceRequest,
                Config = (),
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
                InitError = (),
            > + use<>,
    > {
        App::new()
            .app_data(harness.state.clone())
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(signup)
                    .service(login)
                    .service(post_form)
                    .service(create_post)
                    .service(list_posts)
                    .service(get_post),
            )
    }

    /// Sign up and log in a fixture user against `$app`, evaluating to the
    /// session cookie and the user's id.
    macro_rules! logged_in_cookie {
        ($app:expr) => {{
            let signup_req = actix_test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(json!({
                    "username": "ada",
                    "email": "ada@example.com",
                    "password": "Abcdef1"
                }))
                .to_request();
            let signup_res = actix_test::call_service($app, signup_req).await;
            assert_eq!(signup_res.status(), StatusCode::CREATED);
            let profile: Value = serde_json::from_slice(&actix_test::read_body(signup_res).await)
                .expect("profile payload");
            let user_id = profile
                .get("id")
                .and_then(Value::as_str)
                .expect("user id")
                .to_owned();

            let login_req = actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "email": "ada@example.com", "password": "Abcdef1" }))
                .to_request();
            let login_res = actix_test::call_service($app, login_req).await;
            assert_eq!(login_res.status(), StatusCode::OK);
            let cookie: Cookie<'static> = login_res
                .response()
                .cookies()
                .find(|c| c.name() == "session")
                .expect("session cookie")
                .into_owned();
            (cookie, user_id)
        }};
    }

    #[actix_web::test]
    async fn all_post_routes_require_a_session() {
        let harness = test_harness();
        let app = actix_test::init_service(test_app(&harness)).await;

        let requests = [
            actix_test::TestRequest::get().uri("/api/v1/posts/create"),
            actix_test::TestRequest::post()
                .uri("/api/v1/posts/create")
                .set_json(json!({ "content": "hello" })),
            actix_test::TestRequest::get().uri("/api/v1/posts"),
            actix_test::TestRequest::get()
                .uri("/api/v1/posts/3fa85f64-5717-4562-b3fc-2c963f66afa6"),
        ];
        for request in requests {
            let response = actix_test::call_service(&app, request.to_request()).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let value: Value = serde_json::from_slice(&actix_test::read_body(response).await)
                .expect("explicit error body");
            assert_eq!(
                value.get("code").and_then(Value::as_str),
                Some("unauthorized")
            );
        }
        assert!(harness.posts.is_empty());
    }

    #[actix_web::test]
    async fn create_rejects_empty_content() {
        let harness = test_harness();
        let app = actix_test::init_service(test_app(&harness)).await;
        let (cookie, _) = logged_in_cookie!(&app);

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/posts/create")
            .cookie(cookie)
            .set_json(json!({ "content": "   " }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_slice(&actix_test::read_body(response).await)
            .expect("error payload");
        assert_eq!(
            value.pointer("/details/code").and_then(Value::as_str),
            Some("missing_content")
        );
        assert!(harness.posts.is_empty());
    }

    #[actix_web::test]
    async fn created_post_links_to_the_session_user() {
        let harness = test_harness();
        let app = actix_test::init_service(test_app(&harness)).await;
        let (cookie, user_id) = logged_in_cookie!(&app);

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/posts/create")
            .cookie(cookie)
            .set_json(json!({
                "content": "hello board",
                "picName": "cat",
                "image": { "fileName": "cat.png", "data": "aGVsbG8=" }
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let value: Value = serde_json::from_slice(&actix_test::read_body(response).await)
            .expect("post payload");
        assert_eq!(value.get("creatorId").and_then(Value::as_str), Some(user_id.as_str()));
        assert_eq!(value.get("picName").and_then(Value::as_str), Some("cat"));
        let pic_path = value.get("picPath").and_then(Value::as_str).expect("pic path");
        assert!(pic_path.starts_with("media/"));
        assert_eq!(harness.posts.len(), 1);
    }

    #[actix_web::test]
    async fn listing_is_ordered_and_idempotent() {
        let harness = test_harness();
        let app = actix_test::init_service(test_app(&harness)).await;
        let (cookie, _) = logged_in_cookie!(&app);

        for content in ["first", "second"] {
            let request = actix_test::TestRequest::post()
                .uri("/api/v1/posts/create")
                .cookie(cookie.clone())
                .set_json(json!({ "content": content }))
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let mut bodies = Vec::new();
        for _ in 0..2 {
            let request = actix_test::TestRequest::get()
                .uri("/api/v1/posts")
                .cookie(cookie.clone())
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::OK);
            let value: Value = serde_json::from_slice(&actix_test::read_body(response).await)
                .expect("list payload");
            bodies.push(value);
        }

        assert_eq!(bodies[0], bodies[1]);
        let contents: Vec<_> = bodies[0]
            .as_array()
            .expect("array")
            .iter()
            .map(|post| post.get("content").and_then(Value::as_str).expect("content"))
            .collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[actix_web::test]
    async fn get_post_round_trips_and_misses_are_not_found() {
        let harness = test_harness();
        let app = actix_test::init_service(test_app(&harness)).await;
        let (cookie, _) = logged_in_cookie!(&app);

        let create_req = actix_test::TestRequest::post()
            .uri("/api/v1/posts/create")
            .cookie(cookie.clone())
            .set_json(json!({ "content": "findable" }))
            .to_request();
        let create_res = actix_test::call_service(&app, create_req).await;
        let created: Value = serde_json::from_slice(&actix_test::read_body(create_res).await)
            .expect("post payload");
        let id = created.get("id").and_then(Value::as_str).expect("post id");

        let get_req = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/posts/{id}"))
            .cookie(cookie.clone())
            .to_request();
        let get_res = actix_test::call_service(&app, get_req).await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let fetched: Value = serde_json::from_slice(&actix_test::read_body(get_res).await)
            .expect("post payload");
        assert_eq!(fetched, created);

        for missing in [
            "/api/v1/posts/3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "/api/v1/posts/not-a-uuid",
        ] {
            let request = actix_test::TestRequest::get()
                .uri(missing)
                .cookie(cookie.clone())
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {missing}");
        }
    }
}
