use crate::{error::ApiError, node::Node};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use ledger_core::{
    propagation::PEER_ORIGIN_HEADER, Block, ChainResponse, NodesRequest, PeerTransport,
    Transaction,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

pub fn router<T: PeerTransport + 'static>(node: Node<T>) -> Router {
    Router::new()
        .route("/mine", get(mine::<T>))
        .route("/chain", get(chain::<T>))
        .route("/transactions/new", post(new_transaction::<T>))
        .route("/getNodeUUID", get(node_uuid::<T>))
        .route("/nodes/register", post(register_nodes::<T>))
        .route("/nodes/resolve", get(resolve::<T>))
        .layer(TraceLayer::new_for_http())
        .with_state(node)
}

/// Value of the peer-origin header, if the request has one.
fn origin(headers: &HeaderMap) -> Option<String> {
    headers
        .get(PEER_ORIGIN_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
}

async fn mine<T: PeerTransport + 'static>(
    State(node): State<Node<T>>,
) -> Result<Json<Block>, ApiError> {
    Ok(Json(node.mine().await?))
}

async fn chain<T: PeerTransport + 'static>(State(node): State<Node<T>>) -> Json<ChainResponse> {
    Json(node.chain().await)
}

// Bodies are decoded from raw bytes; `Content-Type` is not required.
async fn new_transaction<T: PeerTransport + 'static>(
    State(node): State<Node<T>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let tx: Transaction = serde_json::from_slice(&body)?;
    node.submit_transaction(tx, origin(&headers).as_deref())
        .await;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "transaction added" })),
    ))
}

async fn node_uuid<T: PeerTransport + 'static>(State(node): State<Node<T>>) -> String {
    node.node_id().to_string()
}

async fn register_nodes<T: PeerTransport + 'static>(
    State(node): State<Node<T>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let request: NodesRequest = serde_json::from_slice(&body)?;
    node.register_nodes(&request.nodes, origin(&headers).as_deref())
        .await;
    let status = if request.nodes.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(json!({ "message": "success" }))))
}

async fn resolve<T: PeerTransport + 'static>(
    State(node): State<Node<T>>,
) -> Result<StatusCode, ApiError> {
    node.resolve_conflicts().await?;
    Ok(StatusCode::OK)
}
