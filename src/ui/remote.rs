use iced::widget::image::Handle;
use std::collections::{HashMap, HashSet};

/// Image handles for server files, keyed by server-relative path.
///
/// Each path is requested once per session; failed downloads are not retried.
#[derive(Debug, Default)]
pub struct RemoteImages {
    handles: HashMap<String, Handle>,
    requested: HashSet<String>,
}

impl RemoteImages {
    /// Mark the paths as requested and return those not requested before
    pub fn claim<I>(&mut self, paths: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        paths
            .into_iter()
            .filter(|path| self.requested.insert(path.clone()))
            .collect()
    }

    pub fn insert(&mut self, path: String, bytes: Vec<u8>) {
        self.handles.insert(path, Handle::from_bytes(bytes));
    }

    pub fn get(&self, path: &str) -> Option<&Handle> {
        self.handles.get(path)
    }

    /// Forget everything (on logout)
    pub fn clear(&mut self) {
        self.handles.clear();
        self.requested.clear();
    }
}
