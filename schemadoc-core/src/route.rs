use http::Method;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::sync::Arc;

use crate::meta::RouteMeta;

/// `<name>` or `<converter:name>` placeholders in a route rule.
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:([^:<>]*):)?([^<>]+)>").expect("placeholder regex should be valid")
});

/// Names of the placeholders in `rule`, in order of appearance.
pub fn path_params(rule: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(rule)
        .filter_map(|caps| caps.get(2).map(|m| m.as_str()))
        .collect()
}

/// Rewrite a rule to an OpenAPI path template: `<int:id>` becomes `{id}`.
pub fn openapi_path(rule: &str) -> String {
    PLACEHOLDER_RE
        .replace_all(rule, |caps: &Captures| format!("{{{}}}", &caps[2]))
        .into_owned()
}

/// Rewrite a rule to an axum route path.
///
/// Same as [`openapi_path`], except that the `path` converter (which matches
/// slashes) becomes a wildcard capture `{*name}`.
pub fn axum_path(rule: &str) -> String {
    PLACEHOLDER_RE
        .replace_all(rule, |caps: &Captures| match caps.get(1).map(|m| m.as_str()) {
            Some("path") => format!("{{*{}}}", &caps[2]),
            _ => format!("{{{}}}", &caps[2]),
        })
        .into_owned()
}

/// A registered route: rule, endpoint name, methods and handler metadata.
///
/// Registering `GET` also registers `HEAD`. `OPTIONS` is added
/// automatically unless it was declared, and the route remembers which
/// was the case.
#[derive(Debug, Clone)]
pub struct Route {
    rule: String,
    endpoint: String,
    methods: Vec<Method>,
    provide_automatic_options: bool,
    meta: Arc<RouteMeta>,
}

impl Route {
    pub fn new(
        rule: impl Into<String>,
        endpoint: impl Into<String>,
        declared: &[Method],
        meta: Arc<RouteMeta>,
    ) -> Self {
        let mut methods: Vec<Method> = Vec::with_capacity(declared.len() + 2);
        for method in declared {
            if !methods.contains(method) {
                methods.push(method.clone());
            }
        }
        if methods.contains(&Method::GET) && !methods.contains(&Method::HEAD) {
            methods.push(Method::HEAD);
        }
        let provide_automatic_options = !methods.contains(&Method::OPTIONS);
        if provide_automatic_options {
            methods.push(Method::OPTIONS);
        }

        Self {
            rule: rule.into(),
            endpoint: endpoint.into(),
            methods,
            provide_automatic_options,
            meta,
        }
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn provide_automatic_options(&self) -> bool {
        self.provide_automatic_options
    }

    pub fn meta(&self) -> &RouteMeta {
        &self.meta
    }

    /// Shared handle on the metadata; routes registered with the same
    /// handler metadata point at the same allocation.
    pub fn meta_handle(&self) -> &Arc<RouteMeta> {
        &self.meta
    }

    pub fn path_params(&self) -> Vec<&str> {
        path_params(&self.rule)
    }

    pub fn openapi_path(&self) -> String {
        openapi_path(&self.rule)
    }

    /// Methods that belong in the document: everything except `HEAD`, and
    /// except `OPTIONS` when it was added automatically.
    pub fn documented_methods(&self) -> impl Iterator<Item = &Method> + '_ {
        self.methods.iter().filter(move |method| {
            **method != Method::HEAD
                && !(**method == Method::OPTIONS && self.provide_automatic_options)
        })
    }
}

/// Ordered collection of registered routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find a route by endpoint name.
    pub fn by_endpoint(&self, endpoint: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.endpoint == endpoint)
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

impl FromIterator<Route> for RouteTable {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

impl Extend<Route> for RouteTable {
    fn extend<I: IntoIterator<Item = Route>>(&mut self, iter: I) {
        self.routes.extend(iter);
    }
}
