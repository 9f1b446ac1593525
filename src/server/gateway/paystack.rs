use std::time::Duration;

use serde_json::{json, Value};

use crate::server::{
    error::payment::PaymentError,
    gateway::{Checkout, InitializeRequest, PaymentGateway, Verification},
};

/// Delay before the first retry, doubled on each further attempt.
const BASE_BACKOFF: Duration = Duration::from_millis(250);

/// Transient failure of a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    /// No connection was established, so Paystack never saw the request.
    Connect,
    Timeout,
    /// The request failed after the connection was made.
    Request,
    /// 5xx response.
    ServerError,
}

/// Which transient failures a call may retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RetryPolicy {
    /// Calls that create state at Paystack. A repeat after the request may have arrived
    /// would open a second checkout.
    ConnectOnly,
    /// Read-only calls.
    AnyTransient,
}

impl RetryPolicy {
    fn retries(self, failure: Failure) -> bool {
        match self {
            Self::ConnectOnly => failure == Failure::Connect,
            Self::AnyTransient => true,
        }
    }
}

/// Paystack REST API client.
///
/// Each request is bounded by the client timeout. Transient failures are retried up to
/// `max_retries` times with exponential backoff before the call fails with
/// `GatewayUnavailable`: `verify` retries timeouts, connection failures and 5xx responses,
/// `initialize` only connection failures. A 4xx response or `"status": false` body fails
/// immediately with `GatewayRejected` carrying Paystack's message.
pub struct PaystackGateway {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
    callback_url: String,
    max_retries: u32,
}

impl PaystackGateway {
    /// Builds the gateway with its own HTTP client.
    ///
    /// # Arguments
    /// - `base_url` - API root, `https://api.paystack.co` in production
    /// - `secret_key` - Secret key sent as bearer token
    /// - `callback_url` - Where Paystack redirects the payer after checkout
    /// - `timeout` - Per-request timeout
    /// - `max_retries` - Retries after the first attempt for transient failures
    ///
    /// # Returns
    /// - `Ok(PaystackGateway)` - Client built
    /// - `Err(reqwest::Error)` - TLS backend could not be initialized
    pub fn new(
        base_url: &str,
        secret_key: &str,
        callback_url: &str,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
            callback_url: callback_url.to_string(),
            max_retries,
        })
    }

    /// Sends a request built by `build`, retrying the failures `policy` allows.
    ///
    /// Returns the parsed JSON body of a successful response whose `status` flag is true.
    async fn send<F>(&self, policy: RetryPolicy, build: F) -> Result<Value, PaymentError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt: u32 = 0;

        loop {
            let (kind, failure) = match build().bearer_auth(&self.secret_key).send().await {
                Ok(response) if response.status().is_server_error() => (
                    Failure::ServerError,
                    format!("Paystack responded with {}", response.status()),
                ),
                Ok(response) => {
                    let status = response.status();
                    let body: Value = response
                        .json()
                        .await
                        .map_err(|e| PaymentError::GatewayUnavailable(e.to_string()))?;

                    let accepted = body.get("status").and_then(Value::as_bool).unwrap_or(false);
                    if status.is_success() && accepted {
                        return Ok(body);
                    }

                    let message = body
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("Payment gateway rejected the request")
                        .to_string();
                    return Err(PaymentError::GatewayRejected(message));
                }
                Err(e) if e.is_connect() => (Failure::Connect, e.to_string()),
                Err(e) if e.is_timeout() => (Failure::Timeout, e.to_string()),
                Err(e) if e.is_request() => (Failure::Request, e.to_string()),
                Err(e) => return Err(PaymentError::GatewayUnavailable(e.to_string())),
            };

            if !policy.retries(kind) || attempt >= self.max_retries {
                return Err(PaymentError::GatewayUnavailable(failure));
            }

            attempt += 1;
            tracing::warn!(
                "Paystack request failed (attempt {} of {}): {}",
                attempt,
                self.max_retries + 1,
                failure
            );
            tokio::time::sleep(BASE_BACKOFF * 2u32.pow(attempt - 1)).await;
        }
    }
}

#[async_trait::async_trait]
impl PaymentGateway for PaystackGateway {
    async fn initialize(&self, request: InitializeRequest) -> Result<Checkout, PaymentError> {
        let url = format!("{}/transaction/initialize", self.base_url);
        let payload = json!({
            "email": request.email,
            // Paystack expects minor units (kobo)
            "amount": request.amount * 100,
            "currency": request.currency,
            "callback_url": self.callback_url,
            "metadata": request.metadata,
        });

        let body = self
            .send(RetryPolicy::ConnectOnly, || {
                self.client.post(&url).json(&payload)
            })
            .await?;

        let data = body.get("data").cloned().unwrap_or(Value::Null);
        let field = |name: &str| data.get(name).and_then(Value::as_str).map(str::to_string);

        match (field("authorization_url"), field("reference")) {
            (Some(authorization_url), Some(reference)) => Ok(Checkout {
                authorization_url,
                reference,
                access_code: field("access_code"),
                raw: body,
            }),
            _ => Err(PaymentError::GatewayRejected(
                "Payment gateway returned an incomplete checkout session".to_string(),
            )),
        }
    }

    async fn verify(&self, reference: &str) -> Result<Verification, PaymentError> {
        let mut url = url::Url::parse(&self.base_url)
            .map_err(|e| PaymentError::GatewayUnavailable(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| PaymentError::GatewayUnavailable("invalid base URL".to_string()))?
            .pop_if_empty()
            .extend(["transaction", "verify", reference]);

        let body = self
            .send(RetryPolicy::AnyTransient, || self.client.get(url.clone()))
            .await?;
        let data = body.get("data").cloned().unwrap_or(Value::Null);

        Ok(Verification::from_transaction(reference, &data, body))
    }
}
