//! Route definitions and path patterns

use crate::error::RouterError;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use super::view::{LazyView, ViewFactory};

/// Parameters captured from a path, keyed by parameter name
pub type Params = BTreeMap<String, String>;

/// Unique name of a route
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteName(pub String);

impl RouteName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for RouteName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RouteName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RouteName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Display metadata attached to a route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Title shown in the document title, if any
    pub title: Option<String>,
}

/// Route definition: a path pattern bound to a lazily loaded view
#[derive(Debug)]
pub struct Route {
    /// Unique name of this route
    pub name: RouteName,
    /// Path pattern as declared, e.g. `/students/:id/edit`
    pub path: String,
    /// Display metadata
    pub meta: RouteMeta,
    /// View loaded on first navigation
    pub view: LazyView,
}

impl Route {
    /// Create a new route with no title
    pub fn new(
        name: impl Into<RouteName>,
        path: impl Into<String>,
        factory: impl ViewFactory + 'static,
    ) -> Self {
        Self::with_view(name, path, LazyView::new(factory))
    }

    /// Create a new route around an already wrapped view
    pub fn with_view(name: impl Into<RouteName>, path: impl Into<String>, view: LazyView) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            meta: RouteMeta::default(),
            view,
        }
    }

    /// Set the title for this route
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    /// Title for this route, if any
    pub fn title(&self) -> Option<&str> {
        self.meta.title.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

/// Compiled form of a route path such as `/students/:id`.
///
/// Supports static segments, `:name` parameters, and a trailing catch-all
/// written either as `*` or `:name(.*)*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        let invalid = |message: &str| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            message: message.to_string(),
        };

        if !pattern.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }

        let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
        let mut segments = Vec::with_capacity(parts.len());

        for (index, part) in parts.iter().enumerate() {
            let is_last = index + 1 == parts.len();

            let segment = if *part == "*" {
                Segment::CatchAll("pathMatch".to_string())
            } else if let Some(param) = part.strip_prefix(':') {
                if let Some(name) = param.strip_suffix("(.*)*") {
                    Segment::CatchAll(name.to_string())
                } else {
                    Segment::Param(param.to_string())
                }
            } else {
                Segment::Static(part.to_string())
            };

            match &segment {
                Segment::Param(name) | Segment::CatchAll(name) => {
                    if name.is_empty() {
                        return Err(invalid("parameter name cannot be empty"));
                    }
                    if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                        return Err(invalid("custom parameter regexes are not supported"));
                    }
                    if matches!(segment, Segment::CatchAll(_)) && !is_last {
                        return Err(invalid("catch-all must be the last segment"));
                    }
                }
                Segment::Static(_) => {}
            }

            segments.push(segment);
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// Pattern as declared
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this pattern ends in a catch-all segment
    pub fn is_catch_all(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::CatchAll(_)))
    }

    /// Canonical form used to detect duplicate declarations.
    ///
    /// Parameter names are erased, so `/students/:id` and `/students/:sid`
    /// collide.
    pub(crate) fn canonical(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Static(s) => out.push_str(&s.to_lowercase()),
                Segment::Param(_) => out.push(':'),
                Segment::CatchAll(_) => out.push('*'),
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        out
    }

    /// Match already split path segments against this pattern
    pub(crate) fn matches(&self, path: &[&str]) -> Option<Params> {
        let mut params = Params::new();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::CatchAll(name) => {
                    let rest: Vec<String> =
                        path.get(index..)?.iter().map(|s| decode(s)).collect();
                    params.insert(name.clone(), rest.join("/"));
                    return Some(params);
                }
                Segment::Static(expected) => {
                    let actual = path.get(index)?;
                    if expected.to_lowercase() != actual.to_lowercase() {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let actual = path.get(index)?;
                    params.insert(name.clone(), decode(actual));
                }
            }
        }

        (path.len() == self.segments.len()).then_some(params)
    }

    /// Build a concrete path, filling parameters from `params`
    pub(crate) fn fill(&self, route: &RouteName, params: &Params) -> Result<String, RouterError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Static(s) => {
                    out.push('/');
                    out.push_str(s);
                }
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| RouterError::MissingParam {
                            route: route.to_string(),
                            param: name.clone(),
                        })?;
                    out.push('/');
                    out.extend(utf8_percent_encode(value, SEGMENT));
                }
                Segment::CatchAll(name) => {
                    if let Some(rest) = params.get(name).filter(|v| !v.is_empty()) {
                        for part in rest.split('/').filter(|p| !p.is_empty()) {
                            out.push('/');
                            out.extend(utf8_percent_encode(part, SEGMENT));
                        }
                    }
                }
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        Ok(out)
    }
}

/// Characters escaped when a parameter value is written into one path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// Split an incoming location into path segments.
///
/// Query string and fragment are dropped, and empty segments (leading,
/// trailing or doubled slashes) are ignored.
pub(crate) fn split_path(location: &str) -> Vec<&str> {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    location[..end].split('/').filter(|s| !s.is_empty()).collect()
}
