//! The merged-stack element: a native or a script frame, carried verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::frame::{NativeFrame, ScriptFrame};

/// Which capture source a [`MergedFrame`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameKind {
    Native,
    Script,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "Native"),
            Self::Script => write!(f, "Script"),
        }
    }
}

/// One element of a merged stack.
///
/// The wrapped record is the original one, unchanged. Serialized internally tagged:
/// `{"type": "Native", "ip": ..., "file": ..., "func": ..., "lineno": ...}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MergedFrame {
    Native(NativeFrame),
    Script(ScriptFrame),
}

impl MergedFrame {
    pub fn kind(&self) -> FrameKind {
        match self {
            Self::Native(_) => FrameKind::Native,
            Self::Script(_) => FrameKind::Script,
        }
    }

    pub fn func(&self) -> &str {
        match self {
            Self::Native(f) => &f.func,
            Self::Script(f) => &f.func,
        }
    }

    pub fn file(&self) -> &str {
        match self {
            Self::Native(f) => &f.file,
            Self::Script(f) => &f.file,
        }
    }

    pub fn lineno(&self) -> i64 {
        match self {
            Self::Native(f) => f.lineno,
            Self::Script(f) => f.lineno,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }

    pub fn is_script(&self) -> bool {
        matches!(self, Self::Script(_))
    }

    pub fn as_native(&self) -> Option<&NativeFrame> {
        match self {
            Self::Native(f) => Some(f),
            Self::Script(_) => None,
        }
    }

    pub fn as_script(&self) -> Option<&ScriptFrame> {
        match self {
            Self::Native(_) => None,
            Self::Script(f) => Some(f),
        }
    }
}

impl From<NativeFrame> for MergedFrame {
    fn from(frame: NativeFrame) -> Self {
        Self::Native(frame)
    }
}

impl From<ScriptFrame> for MergedFrame {
    fn from(frame: ScriptFrame) -> Self {
        Self::Script(frame)
    }
}

impl fmt::Display for MergedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(frame) => write!(f, "[{}] {frame}", FrameKind::Native),
            Self::Script(frame) => write!(f, "[{}] {frame}", FrameKind::Script),
        }
    }
}
