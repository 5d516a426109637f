//! Client for the user service.
//!
//! The [`Client`] type exposes the five user operations. Build one from a
//! [`Config`] or with [`ClientBuilder`], then share it freely: it holds no
//! mutable state and clones are cheap.

use crate::{
    context::Context,
    model::{ListUsersParams, User},
    operation::{Operation, CREATE_USER, DELETE_USER, GET_USER, LIST_USERS, UPDATE_USER},
    transport::{parse_header, HeaderTransport, Transport},
    Error, Result,
};
use http::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use http::HeaderMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Path prefix under which the service mounts its routes unless overridden.
pub const DEFAULT_BASE_PATH: &str = "/v1";

/// Settings for a [`Client`].
///
/// ```
/// use restuser::{Client, Config};
///
/// # fn main() -> restuser::Result<()> {
/// let client = Client::new(Config::new("https://users.example.com").base_path("/preproduction/v1"))?;
/// assert_eq!(client.root().as_str(), "https://users.example.com/preproduction/v1");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct Config {
    /// Base URL of the service, e.g. `https://users.example.com`.
    pub url: String,
    /// Route prefix. `None` means [`DEFAULT_BASE_PATH`].
    pub base_path: Option<String>,
    /// Transport used for every request. `None` means a default `reqwest::Client`.
    pub transport: Option<Arc<dyn Transport>>,
}

impl Config {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("base_path", &self.base_path)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

/// Typed client for the user service.
///
/// # Examples
///
/// ```no_run
/// use restuser::{Client, Context, ListUsersParams, User};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), restuser::Error> {
/// let client = Client::builder()
///     .base_url("https://users.example.com")?
///     .build()?;
///
/// let ctx = Context::background().with_timeout(Duration::from_secs(5));
///
/// let created = client
///     .create_user(&ctx, &User::new("Pepe", "pepe@faceit.com", "fr"))
///     .await?;
/// println!("created {} at {}", created.id, created.created_at);
///
/// let spanish = client.list_users(&ctx, &ListUsersParams::country("es")).await?;
/// println!("{} users in es", spanish.len());
///
/// client.delete_user(&ctx, &created.id).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    root: Url,
}

impl Client {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is missing or invalid, or if the default
    /// transport cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(Error::Configuration("Base URL is required".to_string()));
        }

        let base_path = config.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH);
        let root = join_root(&config.url, base_path)?;

        let transport: Arc<dyn Transport> = match config.transport {
            Some(transport) => transport,
            None => Arc::new(reqwest::Client::builder().build().map_err(|e| {
                Error::Configuration(format!("Failed to build HTTP client: {}", e))
            })?),
        };

        tracing::debug!(root = %root, "Created user service client");

        Ok(Self {
            inner: Arc::new(ClientInner { transport, root }),
        })
    }

    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Base URL joined with the base path. Every route hangs off it.
    pub fn root(&self) -> &Url {
        &self.inner.root
    }

    /// Creates a user. Answers `201 Created` with the stored user.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `user` is `None`, before anything is sent.
    pub async fn create_user<'a>(
        &self,
        ctx: &Context,
        user: impl Into<Option<&'a User>>,
    ) -> Result<User> {
        let user = user
            .into()
            .ok_or_else(|| Error::InvalidInput("user is required".to_string()))?;

        let url = self.users_url(None)?;
        let body = self.roundtrip(ctx, &CREATE_USER, url, Some(user)).await?;
        CREATE_USER.decode(&body)
    }

    /// Replaces the user identified by `user.id`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if `user` is `None` or has an empty id.
    pub async fn update_user<'a>(
        &self,
        ctx: &Context,
        user: impl Into<Option<&'a User>>,
    ) -> Result<User> {
        let user = user
            .into()
            .ok_or_else(|| Error::InvalidInput("user is required".to_string()))?;
        let id = require_id(&user.id)?;

        let url = self.users_url(Some(id))?;
        let body = self.roundtrip(ctx, &UPDATE_USER, url, Some(user)).await?;
        UPDATE_USER.decode(&body)
    }

    /// Fetches a single user.
    pub async fn get_user(&self, ctx: &Context, id: &str) -> Result<User> {
        let url = self.users_url(Some(require_id(id)?))?;
        let body = self.roundtrip(ctx, &GET_USER, url, None).await?;
        GET_USER.decode(&body)
    }

    /// Deletes a user. Answers `204 No Content`.
    pub async fn delete_user(&self, ctx: &Context, id: &str) -> Result<()> {
        let url = self.users_url(Some(require_id(id)?))?;
        self.roundtrip(ctx, &DELETE_USER, url, None).await?;
        Ok(())
    }

    /// Lists users, optionally filtered by country. An empty list is a
    /// valid result.
    pub async fn list_users(&self, ctx: &Context, params: &ListUsersParams) -> Result<Vec<User>> {
        let mut url = self.users_url(None)?;
        let pairs = params.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let body = self.roundtrip(ctx, &LIST_USERS, url, None).await?;
        LIST_USERS.decode(&body)
    }

    /// `{root}/users` or `{root}/users/{id}`.
    fn users_url(&self, id: Option<&str>) -> Result<Url> {
        let mut url = self.inner.root.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                Error::Configuration(format!("Base URL cannot carry a path: {}", self.inner.root))
            })?;
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Sends one request under `ctx` and returns the body of a success
    /// response. Failure statuses are turned into errors per `op`.
    async fn roundtrip(
        &self,
        ctx: &Context,
        op: &Operation,
        url: Url,
        body: Option<&User>,
    ) -> Result<Vec<u8>> {
        let mut request = reqwest::Request::new(op.method.clone(), url);
        request
            .headers_mut()
            .insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(body) = body {
            let json =
                serde_json::to_vec(body).map_err(|e| Error::SerializationFailed(e.to_string()))?;
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            *request.body_mut() = Some(json.into());
        }

        tracing::debug!(
            operation = op.name,
            method = %op.method,
            url = %request.url(),
            "Executing HTTP request"
        );

        let start_time = Instant::now();
        let transport = &self.inner.transport;
        let (status, body) = ctx
            .run(async move {
                let response = transport.execute(request).await?;
                let status = response.status();
                let body = response.bytes().await?;
                Ok::<_, Error>((status, body.to_vec()))
            })
            .await?;

        tracing::debug!(
            operation = op.name,
            status = status.as_u16(),
            latency_ms = start_time.elapsed().as_millis() as u64,
            "Received HTTP response"
        );

        op.check(status, &body)?;
        Ok(body)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("root", &self.inner.root.as_str())
            .finish_non_exhaustive()
    }
}

fn require_id(id: &str) -> Result<&str> {
    if id.is_empty() {
        return Err(Error::InvalidInput("user id is required".to_string()));
    }
    Ok(id)
}

/// Appends the base path segments to the base URL once. Any query or
/// fragment on the URL is kept as is.
fn join_root(url: &str, base_path: &str) -> Result<Url> {
    let mut root = Url::parse(url)?;
    {
        let mut segments = root.path_segments_mut().map_err(|_| {
            Error::Configuration(format!("Base URL cannot carry a path: {}", url))
        })?;
        segments
            .pop_if_empty()
            .extend(base_path.split('/').filter(|s| !s.is_empty()));
    }
    Ok(root)
}

/// Builder for configuring and creating a [`Client`].
///
/// Every setter mirrors a field of [`Config`]; options are applied on top of
/// the defaults in the order they are given.
///
/// ```no_run
/// use restuser::ClientBuilder;
///
/// # fn example() -> Result<(), restuser::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://users.example.com")?
///     .base_path("/preproduction/v1")
///     .default_header("authorization", "Bearer foo")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    config: Config,
    default_headers: HeaderMap,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets the base URL for all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        Url::parse(url.as_ref())?;
        self.config.url = url.as_ref().to_string();
        Ok(self)
    }

    /// Replaces the default `/v1` route prefix.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.config = self.config.base_path(base_path);
        self
    }

    /// Replaces the default transport.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.config = self.config.transport(transport);
        self
    }

    /// Uses a preconfigured `reqwest::Client` as the transport.
    pub fn http_client(self, client: reqwest::Client) -> Self {
        self.transport(client)
    }

    /// Adds a header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was provided or if the client
    /// configuration is invalid.
    pub fn build(self) -> Result<Client> {
        let mut config = self.config;

        if !self.default_headers.is_empty() {
            let inner: Arc<dyn Transport> = match config.transport.take() {
                Some(transport) => transport,
                None => Arc::new(reqwest::Client::builder().build().map_err(|e| {
                    Error::Configuration(format!("Failed to build HTTP client: {}", e))
                })?),
            };
            let transport = HeaderTransport::wrap(inner).headers(self.default_headers);
            config.transport = Some(Arc::new(transport));
        }

        Client::new(config)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
