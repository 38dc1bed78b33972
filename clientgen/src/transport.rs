//! Request execution with bounded, linearly backed-off retries.
//!
//! This file is embedded verbatim (minus its test module) into every
//! generated client. It must only refer to external crates and to items
//! defined in this file.

use std::time::Duration;

/// Attempts made per request unless a [`RetryPolicy`] says otherwise.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Backoff unit: the wait after failed attempt `n` is `n * unit`.
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_millis(100);

/// Errors raised while executing a request.
///
/// A response with a 4xx status, or a 5xx status on the final attempt, is
/// not an error here. Callers inspect the returned status themselves.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The final attempt failed below HTTP (connect, timeout, DNS, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request context was cancelled.
    #[error("request cancelled")]
    Cancelled,

    /// The request context's deadline passed.
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// The request body is a stream and cannot be sent more than once.
    #[error("request body cannot be replayed across retry attempts")]
    NonReplayableBody,

    /// The retry policy allows zero attempts.
    #[error("retry policy allows no attempts")]
    NoAttempts,
}

/// Attempt budget and backoff unit for [`execute_with_retries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Linear backoff unit.
    pub backoff_unit: Duration,
}

impl RetryPolicy {
    /// Creates a policy.
    pub const fn new(max_attempts: u32, backoff_unit: Duration) -> Self {
        Self {
            max_attempts,
            backoff_unit,
        }
    }

    /// The wait after failed attempt `attempt` (1-based).
    ///
    /// ```ignore
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.delay_after(2), Duration::from_millis(200));
    /// ```
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_unit.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BACKOFF_UNIT)
    }
}

/// Cancellation and deadline carried by every outgoing call.
///
/// Clones share the same cancellation token, so cancelling any clone aborts
/// every request that was handed one of them.
#[derive(Debug, Clone)]
pub struct RequestContext {
    token: tokio_util::sync::CancellationToken,
    deadline: Option<tokio::time::Instant>,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self {
            token: tokio_util::sync::CancellationToken::new(),
            deadline: None,
        }
    }

    /// A context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().deadline_at(tokio::time::Instant::now() + timeout)
    }

    /// Sets an absolute deadline.
    #[must_use]
    pub fn deadline_at(mut self, deadline: tokio::time::Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Uses an existing cancellation token, e.g. one owned by a parent task.
    #[must_use]
    pub fn with_cancellation_token(mut self, token: tokio_util::sync::CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Returns a handle to the context's cancellation token.
    pub fn cancellation_token(&self) -> tokio_util::sync::CancellationToken {
        self.token.clone()
    }

    /// Cancels every request using this context.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<tokio::time::Instant> {
        self.deadline
    }

    /// Fails if the context is already cancelled or past its deadline.
    ///
    /// ## Errors
    ///
    /// Returns [`TransportError::Cancelled`] or
    /// [`TransportError::DeadlineExceeded`].
    pub fn check(&self) -> Result<(), TransportError> {
        if self.token.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        if self
            .deadline
            .is_some_and(|deadline| tokio::time::Instant::now() >= deadline)
        {
            return Err(TransportError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> TransportError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                () = self.token.cancelled() => TransportError::Cancelled,
                () = tokio::time::sleep_until(deadline) => TransportError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                TransportError::Cancelled
            }
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Executes `request`, retrying transport errors and 5xx responses.
///
/// Each attempt sends the request exactly once. A response with a status
/// below 500 ends the loop immediately. After failed attempt `n` (except
/// the last) the loop waits `n * policy.backoff_unit`.
///
/// When the budget runs out, the outcome of the final attempt is returned:
/// its 5xx response as `Ok`, or its transport error as `Err`.
///
/// The context is checked before every attempt and raced against both the
/// in-flight request and the backoff wait.
///
/// ## Errors
///
/// - [`TransportError::Http`] if the final attempt failed below HTTP
/// - [`TransportError::Cancelled`] / [`TransportError::DeadlineExceeded`]
/// - [`TransportError::NonReplayableBody`] for streaming bodies
/// - [`TransportError::NoAttempts`] if `policy.max_attempts` is zero
#[tracing::instrument(
    name = "execute_with_retries",
    skip_all,
    fields(http.method = %request.method(), http.url = %request.url())
)]
pub async fn execute_with_retries(
    client: &reqwest::Client,
    request: reqwest::Request,
    policy: &RetryPolicy,
    ctx: &RequestContext,
) -> Result<reqwest::Response, TransportError> {
    let mut last_outcome = None;

    for attempt in 1..=policy.max_attempts {
        ctx.check()?;
        let attempt_request = request
            .try_clone()
            .ok_or(TransportError::NonReplayableBody)?;

        let outcome = tokio::select! {
            reason = ctx.done() => return Err(reason),
            outcome = client.execute(attempt_request) => outcome,
        };

        match outcome {
            Ok(response) if response.status().as_u16() < 500 => {
                tracing::debug!(
                    attempt,
                    status = response.status().as_u16(),
                    "request completed"
                );
                return Ok(response);
            }
            Ok(response) => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    status = response.status().as_u16(),
                    "server error response"
                );
                last_outcome = Some(Ok(response));
            }
            Err(err) => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %err,
                    "request failed"
                );
                last_outcome = Some(Err(err));
            }
        }

        if attempt < policy.max_attempts {
            let delay = policy.delay_after(attempt);
            tokio::select! {
                reason = ctx.done() => return Err(reason),
                () = tokio::time::sleep(delay) => {}
            }
        }
    }

    match last_outcome {
        Some(Ok(response)) => Ok(response),
        Some(Err(err)) => Err(TransportError::Http(err)),
        None => Err(TransportError::NoAttempts),
    }
}

/// Reads `field` from a serialized request body as a query-string value.
///
/// Strings are used as-is, other values in their JSON form. Missing and
/// `null` fields yield `None`.
pub fn query_value(payload: &serde_json::Value, field: &str) -> Option<String> {
    match payload.get(field)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(value) => Some(value.clone()),
        other => Some(other.to_string()),
    }
}
