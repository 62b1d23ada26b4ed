//! Redirect and forward views
//!
//! A [`View`] carries a target path plus the string parameters taken from a
//! [`ParamSource`]. Handlers return it directly, it renders as a `302 Found`
//! for redirects and as a JSON model for forwards.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use reqkit_shared::params::{SourceKind, CLASS_ATTRIBUTE};
use reqkit_shared::{ParamBag, ParamSource};
use serde_json::{json, Value};
use tracing::error;

/// Marker prepended to the name of a redirect view
pub const REDIRECT_PREFIX: &str = "redirect:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTarget {
    Redirect(String),
    Forward(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    target: ViewTarget,
    model: ParamBag,
}

/// Build a redirect view to `url` carrying the string parameters of `params`
pub fn redirect(url: &str, params: Option<&dyn ParamSource>) -> View {
    View {
        target: ViewTarget::Redirect(url.to_string()),
        model: param_bag(params),
    }
}

/// Build a forward view to `url` carrying the string parameters of `params`
pub fn forward(url: &str, params: Option<&dyn ParamSource>) -> View {
    View {
        target: ViewTarget::Forward(url.to_string()),
        model: param_bag(params),
    }
}

impl View {
    /// View name, `redirect:`-prefixed for redirects
    pub fn name(&self) -> String {
        match &self.target {
            ViewTarget::Redirect(url) => format!("{}{}", REDIRECT_PREFIX, url),
            ViewTarget::Forward(url) => url.clone(),
        }
    }

    pub fn target(&self) -> &ViewTarget {
        &self.target
    }

    pub fn path(&self) -> &str {
        match &self.target {
            ViewTarget::Redirect(url) | ViewTarget::Forward(url) => url,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.target, ViewTarget::Redirect(_))
    }

    pub fn model(&self) -> &ParamBag {
        &self.model
    }

    pub fn into_model(self) -> ParamBag {
        self.model
    }

    /// Target path with the model appended as an encoded query string,
    /// ahead of any `#fragment`
    pub fn location(&self) -> String {
        let target = self.path();
        if self.model.is_empty() {
            return target.to_string();
        }
        let (path, fragment) = match target.find('#') {
            Some(pos) => target.split_at(pos),
            None => (target, ""),
        };

        let mut pairs: Vec<(&str, &str)> = self.model.iter().collect();
        pairs.sort_unstable();
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();

        let sep = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}{}", path, sep, query, fragment)
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        match &self.target {
            ViewTarget::Redirect(_) => {
                (StatusCode::FOUND, [(header::LOCATION, self.location())]).into_response()
            }
            ViewTarget::Forward(url) => {
                Json(json!({ "view": url, "model": &self.model })).into_response()
            }
        }
    }
}

fn param_bag(params: Option<&dyn ParamSource>) -> ParamBag {
    params.map(string_params).unwrap_or_default().into_iter().collect()
}

/// String-valued entries of a source, in enumeration order
///
/// Non-string values are dropped, as is `class` for object sources. Read
/// failures are logged and skipped.
pub(crate) fn string_params(source: &dyn ParamSource) -> Vec<(String, String)> {
    let attributes = match source.attributes() {
        Ok(attributes) => attributes,
        Err(e) => {
            error!("Failed to read parameter source: {}", e);
            return Vec::new();
        }
    };

    let skip_class = source.kind() == SourceKind::Object;
    attributes
        .into_iter()
        .filter(|attr| !(skip_class && attr.name == CLASS_ATTRIBUTE))
        .filter_map(|attr| match attr.value {
            Ok(Value::String(value)) => Some((attr.name, value)),
            Ok(_) => None,
            Err(e) => {
                error!("{}", e);
                None
            }
        })
        .collect()
}
