use crate::config::ClientConfig;
use crate::shared::api_utils::{plugin_api_url, with_query};
use contracts::order_tracking::comments::TaskComment;
use contracts::order_tracking::providers::LocationOption;
use contracts::order_tracking::query::{CommentsQuery, OrdersQuery};
use contracts::order_tracking::request::AddCommentRequest;
use contracts::order_tracking::response::{
    CommentsResponse, LocationsResponse, OrdersResponse, ProvidersResponse,
    SavedFilterListResponse, SavedFilterResponse,
};
use contracts::order_tracking::saved_filters::SavedFilter;
use contracts::error::Result;
use contracts::OrderTrackingError;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

fn network(e: gloo_net::Error) -> OrderTrackingError {
    OrderTrackingError::Network(e.to_string())
}

fn ensure_ok(response: &Response, context: &str) -> Result<()> {
    if !response.ok() {
        return Err(OrderTrackingError::Http {
            status: response.status(),
            context: context.to_string(),
        });
    }
    Ok(())
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| OrderTrackingError::Decode(e.to_string()))
}

async fn get_json<T: DeserializeOwned>(url: &str, context: &str) -> Result<T> {
    let response = Request::get(url).send().await.map_err(network)?;
    ensure_ok(&response, context)?;
    parse(response).await
}

/// Fetch all saved filters
pub async fn fetch_saved_filters(config: &ClientConfig) -> Result<Vec<SavedFilter>> {
    let result: SavedFilterListResponse =
        get_json(&plugin_api_url(config, "filters"), "fetch saved filters").await?;
    Ok(result.filters)
}

/// Store a new saved filter; returns the record as the server keeps it
pub async fn save_filter(config: &ClientConfig, filter: &SavedFilter) -> Result<SavedFilter> {
    let response = Request::post(&plugin_api_url(config, "filter"))
        .json(filter)
        .map_err(|e| OrderTrackingError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(network)?;
    ensure_ok(&response, "save filter")?;

    let result: SavedFilterResponse = parse(response).await?;
    Ok(result.filter)
}

/// Delete saved filter
pub async fn delete_filter(config: &ClientConfig, id: &str) -> Result<()> {
    let url = plugin_api_url(config, &format!("filter/{}", urlencoding::encode(id)));
    let response = Request::delete(&url).send().await.map_err(network)?;
    ensure_ok(&response, "delete filter")
}

pub async fn fetch_providers(config: &ClientConfig) -> Result<ProvidersResponse> {
    get_json(&plugin_api_url(config, "providers"), "fetch providers").await
}

pub async fn fetch_locations(config: &ClientConfig) -> Result<Vec<LocationOption>> {
    let result: LocationsResponse =
        get_json(&plugin_api_url(config, "locations"), "fetch locations").await?;
    Ok(result.locations)
}

/// One page of one priority bucket
pub async fn fetch_orders(config: &ClientConfig, query: &OrdersQuery) -> Result<OrdersResponse> {
    let url = with_query(plugin_api_url(config, "orders"), &query.to_query_string()?);
    get_json(&url, "fetch orders").await
}

pub async fn fetch_comments(
    config: &ClientConfig,
    query: &CommentsQuery,
) -> Result<Vec<TaskComment>> {
    let url = with_query(
        plugin_api_url(config, "task-comments"),
        &query.to_query_string()?,
    );
    let result: CommentsResponse = get_json(&url, "fetch task comments").await?;
    Ok(result.comments)
}

pub async fn add_comment(config: &ClientConfig, request: &AddCommentRequest) -> Result<()> {
    let response = Request::post(&plugin_api_url(config, "task-comments"))
        .json(request)
        .map_err(|e| OrderTrackingError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(network)?;
    ensure_ok(&response, "add task comment")
}
