//! Cursor pagination over GraphQL connections.

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::context::RequestContext;
use super::graphql::{json_type, GraphQLClient, Variables};
use crate::constants::{DEFAULT_MAX_PAGES, PAGE_SIZE};
use crate::error::{TwingateError, TwingateResult};

/// Upper bound on the number of pages one `fetch_all` call may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit {
    pub max_pages: usize,
}

impl PageLimit {
    pub const fn new(max_pages: usize) -> Self {
        Self { max_pages }
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGES)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection {
    #[serde(default)]
    edges: Option<Vec<Edge>>,
    #[serde(default)]
    page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct Edge {
    #[serde(default)]
    node: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    #[serde(default)]
    has_next_page: bool,
    #[serde(default)]
    end_cursor: Option<String>,
}

impl Connection {
    fn into_nodes(self) -> Vec<Map<String, Value>> {
        self.edges
            .unwrap_or_default()
            .into_iter()
            // null nodes are dropped
            .filter_map(|edge| edge.node)
            .collect()
    }
}

fn take_connection(
    data: &mut Map<String, Value>,
    root_key: &str,
    item_index: usize,
) -> TwingateResult<Connection> {
    let value = data.remove(root_key).ok_or_else(|| {
        TwingateError::malformed(format!("response has no '{}' field", root_key), item_index)
    })?;

    if !value.is_object() {
        return Err(TwingateError::malformed(
            format!("'{}' should be a connection, got {}", root_key, json_type(&value)),
            item_index,
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        TwingateError::malformed(format!("'{}' is not a valid connection: {}", root_key, e), item_index)
    })
}

impl GraphQLClient {
    /// Follow `pageInfo.endCursor` until `hasNextPage` is false, collecting every
    /// `edges[].node` of the `root_key` connection in server order.
    ///
    /// `after` and `first` are owned by the driver and replace any caller values.
    pub async fn fetch_all(
        &self,
        query: &str,
        root_key: &str,
        variables: &Variables,
        ctx: RequestContext<'_>,
    ) -> TwingateResult<Vec<Map<String, Value>>> {
        let mut nodes = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            if let Some(limit) = self.page_limit {
                if pages >= limit.max_pages {
                    return Err(TwingateError::PageLimitExceeded {
                        root_key: root_key.to_string(),
                        max_pages: limit.max_pages,
                        item_index: ctx.item_index,
                    });
                }
            }

            let mut page_variables = variables.clone();
            page_variables.insert("after".to_string(), json!(cursor));
            page_variables.insert("first".to_string(), json!(PAGE_SIZE));

            let mut data = self.execute(query, &page_variables, ctx).await?;
            pages += 1;

            let connection = take_connection(&mut data, root_key, ctx.item_index)?;
            let page_info = connection.page_info.as_ref().ok_or_else(|| {
                TwingateError::malformed(format!("'{}' has no pageInfo", root_key), ctx.item_index)
            })?;
            let has_next_page = page_info.has_next_page;
            let end_cursor = page_info.end_cursor.clone();

            nodes.extend(connection.into_nodes());
            debug!(root_key, page = pages, total = nodes.len(), has_next_page, "fetched page");

            if !has_next_page {
                break;
            }

            match end_cursor {
                Some(next) => cursor = Some(next),
                None => {
                    return Err(TwingateError::malformed(
                        format!("'{}' reports another page but no endCursor", root_key),
                        ctx.item_index,
                    ))
                }
            }
        }

        Ok(nodes)
    }

    /// Fetch only the first `first` nodes of a connection with a single request.
    pub async fn fetch_first(
        &self,
        query: &str,
        root_key: &str,
        first: u32,
        variables: &Variables,
        ctx: RequestContext<'_>,
    ) -> TwingateResult<Vec<Map<String, Value>>> {
        let mut page_variables = variables.clone();
        page_variables.insert("first".to_string(), json!(first));

        let mut data = self.execute(query, &page_variables, ctx).await?;
        Ok(take_connection(&mut data, root_key, ctx.item_index)?.into_nodes())
    }
}
