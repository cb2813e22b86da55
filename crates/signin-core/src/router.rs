//! Navigation seam between the login screen and the host application.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameters passed along with a navigation call
pub type RouteParams = Map<String, Value>;

/// Destinations the login flow knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Route {
    Login,
    Home,
}

impl Route {
    /// Stable route name used by the host router
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Home => "Home",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait Navigator {
    fn navigate(&mut self, route: Route, params: RouteParams);
}

impl<N: Navigator + ?Sized> Navigator for Box<N> {
    fn navigate(&mut self, route: Route, params: RouteParams) {
        (**self).navigate(route, params)
    }
}

/// Navigator that only records the calls it receives
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    calls: Vec<(Route, RouteParams)>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[(Route, RouteParams)] {
        &self.calls
    }

    /// Route of the most recent call
    pub fn current(&self) -> Option<Route> {
        self.calls.last().map(|(route, _)| *route)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: Route, params: RouteParams) {
        self.calls.push((route, params));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_names() {
        assert_eq!(Route::Home.name(), "Home");
        assert_eq!(Route::Login.to_string(), "Login");
    }

    #[test]
    fn test_recording_navigator() {
        let mut nav = RecordingNavigator::new();
        assert_eq!(nav.current(), None);

        nav.navigate(Route::Home, RouteParams::new());
        assert_eq!(nav.calls().len(), 1);
        assert_eq!(nav.current(), Some(Route::Home));
        assert!(nav.calls()[0].1.is_empty());
    }
}
