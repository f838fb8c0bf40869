//! Request dispatch with clock-skew retry and peer redial
//!
//! One dispatch builds a request for the current peer and sends it. A peer
//! rejecting the request because the client clock runs ahead is retried on
//! the same peer with a larger `timeOffset`. Any other failure asks the
//! [`RedialPolicy`] whether another peer may be tried; if so the current peer
//! is banned (random-peer mode only), a new one is selected and the same
//! logical request starts over.
//!
//! The pool is shared with concurrent dispatches. Its lock is only held for
//! the synchronous bookkeeping steps, never across a transport call.

use parking_lot::RwLock;
use serde_json::{Number, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{ApiResult, SelectionError};
use crate::network::NetworkIdentity;
use crate::outcome::{reports_success, Failure, RequestOutcome};
use crate::peers::PeerPool;
use crate::redial::{NethashRedialPolicy, RedialPolicy};
use crate::request::{Params, RequestBuilder, RequestDescriptor, Verb};
use crate::selector::{NodeSelector, RandomNodeSelector};
use crate::transport::Transport;

/// Seconds added to `timeOffset` per clock-skew retry
pub const TIME_OFFSET_STEP: i64 = 10;

/// Largest `timeOffset` (seconds) that may still be bumped
pub const MAX_TIME_OFFSET: i64 = 40;

const TIMESTAMP_IN_FUTURE: &str = "Timestamp is in the future";

/// Parameter carrying the clock offset in seconds
pub const TIME_OFFSET_PARAM: &str = "timeOffset";

/// Parameter carrying the caller's nethash hint
pub const NETHASH_PARAM: &str = "nethash";

/// Whether a payload is a peer rejecting a timestamp ahead of its clock
pub fn is_timestamp_in_future(payload: &Value) -> bool {
    !reports_success(payload)
        && payload
            .get("message")
            .and_then(Value::as_str)
            .is_some_and(|message| message.contains(TIMESTAMP_IN_FUTURE))
}

/// Current `timeOffset` of the parameters
///
/// Absent or `null` counts as 0; `None` if the value is not a number or a
/// numeric string.
pub fn time_offset(params: &Params) -> Option<Number> {
    match params.get(TIME_OFFSET_PARAM) {
        None | Some(Value::Null) => Some(Number::from(0)),
        Some(Value::Number(n)) => Some(n.clone()),
        Some(Value::String(s)) => serde_json::from_str(s.trim()).ok(),
        Some(_) => None,
    }
}

/// Offset for the next clock-skew retry
///
/// `None` past the ceiling or for an offset that is not numeric. Integral
/// offsets stay integers; fractional ones keep their fraction.
pub fn next_time_offset(params: &Params) -> Option<Value> {
    let current = time_offset(params)?;
    if let Some(n) = current.as_i64() {
        return (n <= MAX_TIME_OFFSET).then(|| Value::from(n + TIME_OFFSET_STEP));
    }
    let f = current.as_f64()?;
    (f <= MAX_TIME_OFFSET as f64).then(|| Value::from(f + TIME_OFFSET_STEP as f64))
}

/// Orchestrates requests over a shared peer pool
pub struct Dispatcher {
    pool: Arc<RwLock<PeerPool>>,
    identity: NetworkIdentity,
    transport: Box<dyn Transport>,
    selector: Box<dyn NodeSelector>,
    redial: Box<dyn RedialPolicy>,
    default_nethash: Option<String>,
}

impl Dispatcher {
    /// Create a dispatcher with the default selector and redial policy
    pub fn new(
        pool: Arc<RwLock<PeerPool>>,
        identity: NetworkIdentity,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            pool,
            identity,
            transport: Box::new(transport),
            selector: Box::new(RandomNodeSelector),
            redial: Box::new(NethashRedialPolicy),
            default_nethash: None,
        }
    }

    /// Replace the node selector
    pub fn with_selector(mut self, selector: impl NodeSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Replace the redial policy
    pub fn with_redial_policy(mut self, policy: impl RedialPolicy + 'static) -> Self {
        self.redial = Box::new(policy);
        self
    }

    /// Nethash hint used when a request carries none
    pub fn with_default_nethash(mut self, nethash: Option<String>) -> Self {
        self.default_nethash = nethash;
        self
    }

    /// Shared pool
    pub fn pool(&self) -> &Arc<RwLock<PeerPool>> {
        &self.pool
    }

    /// Network identity
    pub fn identity(&self) -> &NetworkIdentity {
        &self.identity
    }

    /// Select a node with the configured selector
    pub fn select_node(&self, explicit: Option<&str>) -> Result<String, SelectionError> {
        let pool = self.pool.read();
        self.selector.select_node(&pool, explicit)
    }

    /// Build a request for the current peer
    pub fn build_request(&self, verb: Verb, endpoint: &str, params: &Params) -> RequestDescriptor {
        let pool = self.pool.read();
        let headers = self.identity.headers_for(pool.network());
        RequestBuilder::new(pool.base_url(), headers).build(verb, endpoint, params)
    }

    /// Dispatch one logical request until it succeeds or no recovery remains
    ///
    /// Peer failures resolve to [`RequestOutcome::Failed`]; `Err` is only
    /// returned when node selection fails during a redial.
    pub async fn dispatch(
        &self,
        verb: Verb,
        endpoint: &str,
        mut params: Params,
    ) -> ApiResult<RequestOutcome> {
        loop {
            let request = self.build_request(verb, endpoint, &params);
            debug!("Sending {} {}", verb, request.url);

            let failure = match self.transport.send(&request).await {
                Ok(payload) if reports_success(&payload) => {
                    return Ok(RequestOutcome::Success(payload));
                }
                Ok(payload) => {
                    if is_timestamp_in_future(&payload) {
                        if let Some(offset) = next_time_offset(&params) {
                            warn!(
                                "Timestamp in the future for {}, timeOffset {} -> {}",
                                endpoint,
                                time_offset(&params).unwrap_or_else(|| Number::from(0)),
                                offset
                            );
                            params.insert(TIME_OFFSET_PARAM.to_string(), offset);
                            continue;
                        }
                    }
                    Failure::Rejected(payload)
                }
                Err(err) => Failure::Transport(err),
            };

            if !self.redial(&params)? {
                warn!("Could not reach any known peer for {} {}", verb, endpoint);
                return Ok(RequestOutcome::unreachable(failure));
            }
        }
    }

    /// Move to another peer if the redial policy allows it
    fn redial(&self, params: &Params) -> Result<bool, SelectionError> {
        let hint = params
            .get(NETHASH_PARAM)
            .and_then(Value::as_str)
            .or(self.default_nethash.as_deref());

        let mut pool = self.pool.write();
        if !self.redial.may_redial(&mut pool, hint) {
            return Ok(false);
        }

        let previous = pool.current_peer().to_string();
        if pool.random_peer() && pool.ban_current_node() {
            warn!("Banned peer {}", previous);
        }

        let next = self.selector.select_node(&pool, None)?;
        info!("Redialing from {} to {}", previous, next);
        pool.set_current_peer(next);
        Ok(true)
    }
}
