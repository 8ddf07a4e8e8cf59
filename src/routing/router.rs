//! Route table.
//!
//! Routes are kept in registration order and looked up with a linear scan;
//! the first route whose method and template both match wins. Overlapping
//! templates are resolved by that order alone.

use std::fmt;
use std::future::Future;

use crate::http::request::{Method, Request};
use crate::routing::RouteError;
use crate::routing::handler::{Handler, HandlerResult};
use crate::routing::template::{PathParams, PathTemplate};

/// A registered route.
pub struct Route {
    method: Method,
    template: PathTemplate,
    handler: Box<dyn Handler>,
}

impl Route {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }

    fn capture(&self, method: Method, path: &str) -> Option<PathParams> {
        if self.method != method {
            return None;
        }
        self.template.matches(path)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("template", &self.template.as_str())
            .finish()
    }
}

/// Ordered route table. Filled during setup, read-only once serving.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route after every route registered so far.
    ///
    /// # Errors
    ///
    /// `RouteError::InvalidTemplate` if `template` does not start with `/`
    /// or repeats a variable name.
    pub fn register<F, Fut>(
        &mut self,
        method: Method,
        template: &str,
        handler: F,
    ) -> Result<&mut Self, RouteError>
    where
        F: Fn(Request, PathParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let template = PathTemplate::parse(template)?;

        tracing::debug!(
            method = %method,
            template = template.as_str(),
            variables = ?template.variables(),
            "Registered route"
        );

        self.routes.push(Route {
            method,
            template,
            handler: Box::new(handler),
        });
        Ok(self)
    }

    pub fn get<F, Fut>(&mut self, template: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(Request, PathParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.register(Method::GET, template, handler)
    }

    pub fn post<F, Fut>(&mut self, template: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(Request, PathParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.register(Method::POST, template, handler)
    }

    pub fn put<F, Fut>(&mut self, template: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(Request, PathParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.register(Method::PUT, template, handler)
    }

    pub fn patch<F, Fut>(&mut self, template: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(Request, PathParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.register(Method::PATCH, template, handler)
    }

    pub fn delete<F, Fut>(&mut self, template: &str, handler: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(Request, PathParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.register(Method::DELETE, template, handler)
    }

    /// First registered route for `method` whose template matches all of `path`.
    pub fn find(&self, method: Method, path: &str) -> Option<&Route> {
        self.lookup(method, path).map(|(route, _)| route)
    }

    /// `find` and `extract_variables` in one pass over the table.
    pub fn lookup(&self, method: Method, path: &str) -> Option<(&Route, PathParams)> {
        self.routes
            .iter()
            .find_map(|route| route.capture(method, path).map(|params| (route, params)))
    }

    /// Variables captured by `route` for `path`; empty if it does not match.
    pub fn extract_variables(&self, route: &Route, path: &str) -> PathParams {
        route.template.matches(path).unwrap_or_default()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
