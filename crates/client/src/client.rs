//! Client facade
//!
//! [`DmartClient`] aggregates the per-endpoint services behind one object.
//! It owns the transport, the parsed endpoint table and the token store;
//! the auth token is set on a successful login, read lazily (with expiry)
//! before each request, and cleared on logout. Each client instance carries
//! its own session, so multiple clients in one process stay independent.

use dmart_domain::{
    access_token, ActionRequest, ApiResponse, DataAssetRequest, EntryQuery, FilePayload,
    FileRequest, LoginResponse, ProfileResponse, QueryRequest, QueryResponse, QueryType,
    ResourceType, ResponseEntry, Result, Scope, SubmitRequest, TicketRequest, MANAGEMENT_SPACE,
};
use serde_json::Value;
use tracing::info;

use crate::config::DmartConfig;
use crate::endpoints::Endpoints;
use crate::http::Transport;
use crate::services::{asset, auth, entry, file, info, query, request, ticket};
use crate::storage::{MemoryBackend, StorageBackend, TokenStore};

/// Async client for a dmart backend. One instance, one session.
pub struct DmartClient {
    config: DmartConfig,
    transport: Transport,
    endpoints: Endpoints,
    store: TokenStore,
}

impl DmartClient {
    /// Build a client holding its session token in process memory.
    pub fn new(config: DmartConfig) -> Result<Self> {
        Self::with_backend(config, Box::new(MemoryBackend::new()))
    }

    /// Build a client over a caller-supplied storage backend, e.g. one that
    /// persists tokens across restarts.
    pub fn with_backend(config: DmartConfig, backend: Box<dyn StorageBackend>) -> Result<Self> {
        let transport = Transport::new(&config)?;
        let store = TokenStore::new(backend, &config.storage);
        Ok(Self { config, transport, endpoints: Endpoints::default(), store })
    }

    /// The stored session token, if present and unexpired.
    pub fn token(&self) -> Option<String> {
        self.store.get_item(&self.config.storage.auth_key)
    }

    fn remember_token(&self, response: &LoginResponse) {
        if !response.is_success() {
            return;
        }
        if let Some(token) = access_token(response) {
            self.store.set_item(&self.config.storage.auth_key, token);
            info!("session established");
        }
    }

    /// Log in by shortname; on success the returned token is stored and
    /// attached to subsequent requests.
    pub async fn login(&self, shortname: &str, password: &str) -> Result<LoginResponse> {
        let response = auth::login(&self.transport, &self.endpoints, shortname, password).await?;
        self.remember_token(&response);
        Ok(response)
    }

    /// Log in with arbitrary identifying properties (email, msisdn, ...).
    pub async fn login_by(&self, credentials: &Value, password: &str) -> Result<LoginResponse> {
        let response =
            auth::login_by(&self.transport, &self.endpoints, credentials, password).await?;
        self.remember_token(&response);
        Ok(response)
    }

    /// End the session. The stored token is cleared whatever the backend
    /// answers, transport failures included.
    pub async fn logout(&self) -> Result<ApiResponse> {
        let token = self.token();
        let result = auth::logout(&self.transport, &self.endpoints, token.as_deref()).await;
        self.store.remove_item(&self.config.storage.auth_key);
        info!("session cleared");
        result
    }

    pub async fn get_profile(&self) -> Result<ProfileResponse> {
        let token = self.token();
        auth::get_profile(&self.transport, &self.endpoints, token.as_deref()).await
    }

    pub async fn create_user(&self, user_request: &Value) -> Result<ApiResponse> {
        let token = self.token();
        auth::create_user(&self.transport, &self.endpoints, token.as_deref(), user_request).await
    }

    pub async fn update_user(&self, user_request: &Value) -> Result<ApiResponse> {
        let token = self.token();
        auth::update_user(&self.transport, &self.endpoints, token.as_deref(), user_request).await
    }

    /// Check whether a user property value is already taken.
    pub async fn check_existing(&self, prop: &str, value: &str) -> Result<ResponseEntry> {
        let token = self.token();
        entry::check_existing(&self.transport, &self.endpoints, token.as_deref(), prop, value).await
    }

    /// Run a search/listing query, bounded by the configured query timeout.
    pub async fn query(&self, query_request: &QueryRequest, scope: Scope) -> Result<QueryResponse> {
        let token = self.token();
        query::query(
            &self.transport,
            &self.endpoints,
            token.as_deref(),
            query_request,
            scope,
            self.config.query_timeout,
        )
        .await
    }

    /// Export query results as CSV.
    pub async fn csv(&self, query_request: &QueryRequest) -> Result<QueryResponse> {
        let token = self.token();
        query::csv(&self.transport, &self.endpoints, token.as_deref(), query_request).await
    }

    /// List all spaces visible to the session.
    pub async fn get_spaces(&self) -> Result<QueryResponse> {
        let mut spaces = QueryRequest::new(QueryType::Spaces, MANAGEMENT_SPACE, "/");
        spaces.limit = Some(100);
        self.query(&spaces, Scope::Managed).await
    }

    /// List the direct children of a subpath.
    pub async fn get_children(
        &self,
        space_name: &str,
        subpath: &str,
        limit: u64,
        offset: u64,
        filter_types: Option<Vec<ResourceType>>,
    ) -> Result<QueryResponse> {
        let mut children = QueryRequest::new(QueryType::Search, space_name, subpath);
        children.exact_subpath = Some(true);
        children.limit = Some(limit);
        children.offset = Some(offset);
        children.filter_types = filter_types;
        self.query(&children, Scope::Managed).await
    }

    /// Fetch a single entry.
    pub async fn retrieve_entry(
        &self,
        entry_query: &EntryQuery,
        scope: Scope,
    ) -> Result<ResponseEntry> {
        let token = self.token();
        entry::retrieve_entry(&self.transport, &self.endpoints, token.as_deref(), entry_query, scope)
            .await
    }

    /// Upload one file as an entry payload.
    pub async fn upload_with_payload(
        &self,
        file_request: &FileRequest,
        payload: &FilePayload,
        scope: Scope,
    ) -> Result<ApiResponse> {
        let token = self.token();
        file::upload_with_payload(
            &self.transport,
            &self.endpoints,
            token.as_deref(),
            file_request,
            payload,
            scope,
        )
        .await
    }

    /// Upload several files against the same addressing record; the first
    /// failure is surfaced after all uploads settle.
    pub async fn upload_multiple(
        &self,
        file_request: &FileRequest,
        payloads: &[FilePayload],
        scope: Scope,
    ) -> Result<()> {
        let token = self.token();
        file::upload_multiple(
            &self.transport,
            &self.endpoints,
            token.as_deref(),
            file_request,
            payloads,
            scope,
        )
        .await
    }

    /// Absolute URL of an entry's payload file.
    pub fn get_file_url(&self, file_request: &FileRequest, scope: Scope) -> String {
        file::file_url(&self.transport, &self.endpoints, file_request, scope)
    }

    /// Fetch an entry's JSON payload file directly.
    pub async fn get_file(&self, file_request: &FileRequest, scope: Scope) -> Result<Value> {
        let token = self.token();
        file::get_file(&self.transport, &self.endpoints, token.as_deref(), file_request, scope)
            .await
    }

    /// Send a batch mutation against managed resources.
    pub async fn request(&self, action: &ActionRequest) -> Result<ApiResponse> {
        let token = self.token();
        request::request(&self.transport, &self.endpoints, token.as_deref(), action).await
    }

    /// Submit a record through a public workflow.
    pub async fn submit(&self, submission: &SubmitRequest) -> Result<ApiResponse> {
        let token = self.token();
        request::submit(&self.transport, &self.endpoints, token.as_deref(), submission).await
    }

    /// Run a space-management mutation.
    pub async fn space(&self, action: &ActionRequest) -> Result<ApiResponse> {
        let token = self.token();
        request::space(&self.transport, &self.endpoints, token.as_deref(), action).await
    }

    /// Apply a workflow action to a ticket.
    pub async fn progress_ticket(&self, ticket_request: &TicketRequest) -> Result<ApiResponse> {
        let token = self.token();
        ticket::progress_ticket(&self.transport, &self.endpoints, token.as_deref(), ticket_request)
            .await
    }

    pub async fn get_space_health(&self, space_name: &str) -> Result<QueryResponse> {
        let token = self.token();
        info::get_space_health(&self.transport, &self.endpoints, token.as_deref(), space_name).await
    }

    pub async fn get_manifest(&self) -> Result<Value> {
        let token = self.token();
        info::get_manifest(&self.transport, &self.endpoints, token.as_deref()).await
    }

    pub async fn get_settings(&self) -> Result<Value> {
        let token = self.token();
        info::get_settings(&self.transport, &self.endpoints, token.as_deref()).await
    }

    /// Run a SQL-style query against a tabular data asset.
    pub async fn data_asset(&self, asset_request: &DataAssetRequest) -> Result<Value> {
        let token = self.token();
        asset::data_asset(&self.transport, &self.endpoints, token.as_deref(), asset_request).await
    }
}
