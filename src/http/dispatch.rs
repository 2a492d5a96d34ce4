use futures_util::StreamExt;
use reqwest::Client;
use tracing::debug;

use crate::scenario::RequestDescriptor;

/// What happened to one request, as far as the engine's metrics care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A response arrived and its body was drained.
    Status(u16),
    TimedOut,
    TransportError,
}

impl DispatchOutcome {
    #[must_use]
    pub const fn status_code(self) -> Option<u16> {
        match self {
            DispatchOutcome::Status(code) => Some(code),
            DispatchOutcome::TimedOut | DispatchOutcome::TransportError => None,
        }
    }
}

/// Sends `request` once. No retries, no response validation.
pub async fn dispatch(client: &Client, request: RequestDescriptor) -> DispatchOutcome {
    let RequestDescriptor {
        method,
        url,
        headers,
        body,
    } = request;

    let response = match client
        .request(method, url)
        .headers(headers)
        .body(body)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => return classify_error(&err),
    };

    let status = response.status().as_u16();
    match drain_response_body(response).await {
        Ok(_) => DispatchOutcome::Status(status),
        Err(err) => classify_error(&err),
    }
}

fn classify_error(err: &reqwest::Error) -> DispatchOutcome {
    debug!("Request failed: {}", err);
    if err.is_timeout() {
        DispatchOutcome::TimedOut
    } else {
        DispatchOutcome::TransportError
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
