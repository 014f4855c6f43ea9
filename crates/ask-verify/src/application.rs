//! Application id allow-list.

use std::collections::BTreeSet;

use crate::error::{AuthError, AuthResult};

/// Application ids this endpoint serves. Comparison is exact, byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedApplications {
    ids: BTreeSet<String>,
}

impl AllowedApplications {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ids.into_iter().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// An absent, empty or unknown id is rejected. An empty allow-list
    /// rejects everything.
    pub fn check(&self, claimed: Option<&str>) -> AuthResult<()> {
        match claimed {
            Some(id) if !id.is_empty() && self.contains(id) => Ok(()),
            _ => Err(AuthError::ApplicationIdMismatch {
                claimed: claimed.map(str::to_string),
            }),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for AllowedApplications {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
