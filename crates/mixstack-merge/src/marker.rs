use std::fmt;

use mixstack_types::NativeFrame;
use serde::{Deserialize, Serialize};

/// Function name of CPython's frame-evaluation loop.
pub const DEFAULT_MARKER: &str = "PyEval_EvalFrameDefault";

/// The exact function name of an interpreter trampoline frame.
///
/// A native frame is a trampoline only when its `func` is byte-for-byte equal
/// to the marker; prefixes and substrings do not match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marker(String);

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `frame` is a trampoline for this marker.
    pub fn matches(&self, frame: &NativeFrame) -> bool {
        frame.func == self.0
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Marker {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Marker {
    fn from(name: String) -> Self {
        Self(name)
    }
}
