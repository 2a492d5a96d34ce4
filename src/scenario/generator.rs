use rand::Rng;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Url};

use crate::args::{LoadArgs, PathAlphabet, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{DispatchOutcome, dispatch};

use super::payload::RequestPayload;
use super::token::random_token;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// One outbound request, fully built but not yet sent.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: String,
}

impl RequestDescriptor {
    /// The random token, i.e. the last path segment.
    #[must_use]
    pub fn path_token(&self) -> Option<&str> {
        self.url.path_segments().and_then(|segments| segments.last())
    }
}

/// Builds the per-iteration request. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct RequestGenerator {
    base: Url,
    alphabet: PathAlphabet,
    path_length: PositiveUsize,
    headers: HeaderMap,
    body: String,
}

impl RequestGenerator {
    /// Creates a generator targeting `target`.
    ///
    /// # Errors
    ///
    /// Returns an error when `target` is not an absolute http(s) URL with a
    /// host, or when it carries a query or fragment.
    pub fn new(target: &str, alphabet: PathAlphabet, path_length: PositiveUsize) -> AppResult<Self> {
        let base = parse_target(target)?;
        let body = RequestPayload::default().to_json()?;
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        Ok(Self {
            base,
            alphabet,
            path_length,
            headers,
            body,
        })
    }

    /// Creates a generator from parsed CLI/config values.
    ///
    /// # Errors
    ///
    /// Returns an error when the target URL is invalid.
    pub fn from_args(args: &LoadArgs) -> AppResult<Self> {
        Self::new(&args.target, args.alphabet, args.path_length)
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// Builds a request with a fresh token from the thread-local RNG.
    #[must_use]
    pub fn generate(&self) -> RequestDescriptor {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Builds a request drawing the token from `rng`.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> RequestDescriptor {
        let token = random_token(rng, self.alphabet, self.path_length.get());
        let mut url = self.base.clone();
        // parse_target rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&token);
        }

        RequestDescriptor {
            method: Method::POST,
            url,
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }

    /// Generates one request and sends it. The response is drained, never
    /// inspected; the outcome is only meant for the engine's metrics.
    pub async fn fire(&self, client: &Client) -> DispatchOutcome {
        let request = self.generate();
        dispatch(client, request).await
    }
}

fn parse_target(target: &str) -> AppResult<Url> {
    let trimmed = target.trim();
    let url = Url::parse(trimmed).map_err(|err| {
        AppError::validation(ValidationError::InvalidTargetUrl {
            url: trimmed.to_owned(),
            source: err,
        })
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::validation(
            ValidationError::UnsupportedTargetScheme {
                url: trimmed.to_owned(),
            },
        ));
    }
    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::validation(ValidationError::TargetMissingHost {
            url: trimmed.to_owned(),
        }));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(AppError::validation(
            ValidationError::TargetHasQueryOrFragment {
                url: trimmed.to_owned(),
            },
        ));
    }

    Ok(url)
}
