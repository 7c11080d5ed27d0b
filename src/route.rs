//! Route identifiers understood by the handler

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One of the four supported `METHOD /path-template` identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    DeleteItem,
    GetItem,
    ListItems,
    PutItem,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::DeleteItem,
        Route::GetItem,
        Route::ListItems,
        Route::PutItem,
    ];

    /// The route key as API Gateway spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::DeleteItem => "DELETE /items/{id}",
            Route::GetItem => "GET /items/{id}",
            Route::ListItems => "GET /items",
            Route::PutItem => "PUT /items",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Route {
    type Err = Error;

    /// Exact match only: no trimming, no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::ALL
            .into_iter()
            .find(|route| route.as_str() == s)
            .ok_or_else(|| Error::UnsupportedRoute(s.to_string()))
    }
}
