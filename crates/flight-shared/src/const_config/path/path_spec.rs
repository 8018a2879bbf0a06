use reqwest::Method;

use crate::id::DbId;

#[derive(Debug, Clone)]
pub struct PathSpec {
    pub path: &'static str,
    pub method: Method,
}

impl PathSpec {
    pub const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: Method::GET,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: Method::POST,
        }
    }

    pub const fn put(path: &'static str) -> Self {
        Self {
            path,
            method: Method::PUT,
        }
    }

    pub const fn patch(path: &'static str) -> Self {
        Self {
            path,
            method: Method::PATCH,
        }
    }

    pub const fn delete(path: &'static str) -> Self {
        Self {
            path,
            method: Method::DELETE,
        }
    }

    /// Path for an instance endpoint, eg `/api/flights/` -> `/api/flights/7/`
    ///
    /// The backend addresses single resources by appending the id and a
    /// trailing slash to the collection path
    pub fn instance_path(&self, id: DbId) -> String {
        debug_assert!(
            self.path.ends_with('/'),
            "collection paths are expected to end with a slash: {}",
            self.path
        );
        format!("{}{id}/", self.path)
    }
}
