//! Route table and access guard.

use std::fmt;

/// Client routes. Anything unrecognized is kept verbatim and treated as
/// protected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Signup,
    Dashboard,
    Other(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        match path {
            "" | "/" => Self::Root,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/dashboard" => Self::Dashboard,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Dashboard => "/dashboard",
            Self::Other(path) => path,
        }
    }

    /// Public routes are exactly login, signup and the root path.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Root | Self::Login | Self::Signup)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Hydration has not finished; no decision yet.
    Pending,
    Allow,
    Redirect(Route),
}

/// Decide whether `route` may be entered. Token presence is the only check.
pub fn evaluate(booting: bool, has_token: bool, route: &Route) -> GuardDecision {
    if booting {
        return GuardDecision::Pending;
    }
    if has_token || route.is_public() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(Route::Login)
    }
}
