use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// The advertised endpoints of a replica, keyed by listener name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    listeners: BTreeMap<String, String>,
}

impl Endpoints {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn empty_ref() -> &'static Endpoints {
        static EMPTY: Endpoints = Endpoints {
            listeners: BTreeMap::new(),
        };
        &EMPTY
    }

    /// A single listener, the common case outside of migrations.
    pub fn single(listener: impl Into<String>, address: impl Into<String>) -> Self {
        let mut listeners = BTreeMap::new();
        listeners.insert(listener.into(), address.into());
        Self { listeners }
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn address(&self, listener: &str) -> Option<&str> {
        self.listeners.get(listener).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.listeners.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Endpoints {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            listeners: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Endpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (listener, address)) in self.listeners.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", listener, address)?;
        }
        write!(f, "}}")
    }
}
