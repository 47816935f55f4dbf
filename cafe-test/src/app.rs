use axum::body::Body;
use axum::Router;
use bytes::Bytes;
use http::header::{CONTENT_TYPE, LOCATION};
use http::request::Builder;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tower::util::ServiceExt;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Drives an axum `Router` in process, one `oneshot` call per request.
///
/// Cloning the router per request keeps shared state (the database pool)
/// while giving every call a fresh service.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub fn get(&self, path: &str) -> TestRequest<'_> {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> TestRequest<'_> {
        self.request(Method::POST, path)
    }

    pub fn request(&self, method: Method, path: &str) -> TestRequest<'_> {
        TestRequest {
            app: self,
            builder: Request::builder().method(method).uri(path),
            body: Vec::new(),
        }
    }

    /// POST `fields` as an HTML form would and return the response.
    pub async fn submit(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.post(path).form(fields).send().await
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        TestResponse::collect(response).await
    }
}

/// A request under construction.
pub struct TestRequest<'a> {
    app: &'a TestApp,
    builder: Builder,
    body: Vec<u8>,
}

impl TestRequest<'_> {
    /// Encode `fields` as `application/x-www-form-urlencoded`, keeping their order.
    ///
    /// Repeat a key to submit it more than once; leave it out to model an
    /// unchecked checkbox.
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        let mut encoder = form_urlencoded::Serializer::new(String::new());
        encoder.extend_pairs(fields.iter().copied());
        self.body = encoder.finish().into_bytes();
        self.builder = self.builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE);
        self
    }

    pub async fn send(self) -> TestResponse {
        let request = self
            .builder
            .body(Body::from(self.body))
            .expect("test request should be well-formed");
        self.app.dispatch(request).await
    }
}

/// A buffered response. Assertions consume and return `self` so they chain.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    async fn collect(response: Response<Body>) -> Self {
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map(|collected| collected.to_bytes())
            .unwrap_or_else(|e: axum::Error| panic!("could not read response body: {e}"));
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    pub fn assert_status(self, expected: StatusCode) -> Self {
        if self.status != expected {
            panic!(
                "expected status {expected}, got {}\n--- body ---\n{}",
                self.status,
                self.text()
            );
        }
        self
    }

    pub fn assert_ok(self) -> Self {
        self.assert_status(StatusCode::OK)
    }

    pub fn assert_not_found(self) -> Self {
        self.assert_status(StatusCode::NOT_FOUND)
    }

    /// A post/redirect/get hop: `303 See Other` pointing at `target`.
    pub fn assert_redirect_to(self, target: &str) -> Self {
        let this = self.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(this.location(), Some(target), "redirect went elsewhere");
        this
    }

    /// The body is an HTML page and contains `needle` verbatim (already escaped).
    pub fn assert_html_contains(self, needle: &str) -> Self {
        let content_type = self.header(CONTENT_TYPE).unwrap_or_default();
        assert!(
            content_type.starts_with("text/html"),
            "not an HTML response (content-type {content_type:?})"
        );
        let text = self.text();
        assert!(text.contains(needle), "{needle:?} not found in page:\n{text}");
        self
    }

    pub fn assert_not_contains(self, needle: &str) -> Self {
        let text = self.text();
        assert!(!text.contains(needle), "{needle:?} unexpectedly present:\n{text}");
        self
    }

    /// Issue a GET for the `Location` of this response.
    pub async fn follow(&self, app: &TestApp) -> TestResponse {
        let Some(target) = self.location() else {
            panic!("response {} has no Location header", self.status);
        };
        app.get(target).send().await
    }

    pub fn header<K>(&self, name: K) -> Option<&str>
    where
        HeaderName: TryFrom<K>,
    {
        let name = HeaderName::try_from(name).ok()?;
        self.headers.get(name).and_then(|v: &HeaderValue| v.to_str().ok())
    }

    pub fn location(&self) -> Option<&str> {
        self.header(LOCATION)
    }

    pub fn json<T: DeserializeOwned>(&self) -> T {
        match serde_json::from_slice(&self.body) {
            Ok(value) => value,
            Err(e) => panic!("body is not the expected JSON ({e}):\n{}", self.text()),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
