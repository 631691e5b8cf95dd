/// Delegated routing endpoint
///
/// Serves the providers side of the delegated content-routing contract:
/// `GET /routing/v1/providers/:identifier` answers "who has this content".
/// Every outcome is a status plus JSON body; nothing here unwinds past the
/// handler.
use crate::{context::AppContext, directory::ProviderRecord, routing_key::RoutingKey};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Build routing routes
///
/// Non-GET methods on the providers path are unroutable, same as unknown
/// paths, rather than a 405.
pub fn routes() -> Router<AppContext> {
    Router::new().route(
        "/routing/v1/providers/:identifier",
        get(get_providers).fallback(crate::server::not_found),
    )
}

/// Wire form of one provider claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Addrs")]
    pub addrs: Vec<String>,
    #[serde(rename = "Protocols")]
    pub protocols: Vec<String>,
}

impl From<ProviderRecord> for ProviderEntry {
    fn from(record: ProviderRecord) -> Self {
        Self {
            id: record.peer_id,
            addrs: record.addrs,
            protocols: record.protocols,
        }
    }
}

/// Wire form of a providers response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersResponse {
    #[serde(rename = "Providers")]
    pub providers: Vec<ProviderEntry>,
}

/// Tagged outcome of routing one providers request
enum LookupOutcome {
    Hit(ProviderRecord),
    Miss,
    Invalid,
}

/// GET /routing/v1/providers/:identifier
///
/// The identifier arrives percent-decoded from the path segment. The lookup
/// counter is bumped once per request, whatever the outcome.
pub async fn get_providers(
    State(ctx): State<AppContext>,
    Path(identifier): Path<String>,
) -> (StatusCode, Json<ProvidersResponse>) {
    let served = ctx.record_lookup_request();
    debug!("Providers lookup #{} for {:?}", served, identifier);

    let outcome = match RoutingKey::parse(&identifier) {
        Ok(key) => match ctx.directory.lookup(&key) {
            Some(record) => LookupOutcome::Hit(record),
            None => LookupOutcome::Miss,
        },
        Err(e) => {
            debug!("Rejected identifier {:?}: {}", identifier, e);
            LookupOutcome::Invalid
        }
    };

    respond(outcome)
}

/// Serialize a tagged outcome into status plus providers payload
fn respond(outcome: LookupOutcome) -> (StatusCode, Json<ProvidersResponse>) {
    match outcome {
        LookupOutcome::Hit(record) => (
            StatusCode::OK,
            Json(ProvidersResponse {
                providers: vec![record.into()],
            }),
        ),
        LookupOutcome::Miss => (
            StatusCode::NOT_FOUND,
            Json(ProvidersResponse { providers: vec![] }),
        ),
        LookupOutcome::Invalid => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ProvidersResponse { providers: vec![] }),
        ),
    }
}
