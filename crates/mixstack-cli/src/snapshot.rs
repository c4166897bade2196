//! Snapshot-pair input for the CLI.
//!
//! The file holds what the two external capture layers produced:
//!
//! ```json
//! {
//!   "native": [{"ip": "0x400000", "file": "main.c", "func": "main", "lineno": 100}],
//!   "script": [{"file": "app.py", "func": "run", "lineno": 10, "locals": {"n": 1}}]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use mixstack_types::{NativeFrame, ScriptFrame};
use serde::Deserialize;

/// One native snapshot and one script snapshot taken from the same process.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    #[serde(default)]
    pub native: Vec<NativeFrame>,
    #[serde(default)]
    pub script: Vec<ScriptFrame>,
}

impl Snapshot {
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        serde_json::from_str(s).context("malformed snapshot JSON")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// A mixed stack: `main` enters the interpreter twice before calling back
    /// into native code.
    pub fn demo() -> Self {
        Self {
            native: vec![
                NativeFrame::new("0x400000", "main.c", "main", 100),
                NativeFrame::new("0x500000", "pyeval.c", "PyEval_EvalFrameDefault", 200),
                NativeFrame::new("0x600000", "pyeval.c", "PyEval_EvalFrameDefault", 250),
                NativeFrame::new("0x700000", "native.c", "native_func", 42),
            ],
            script: vec![
                ScriptFrame::new("app.py", "run", 10, None)
                    .with_local("server", "http://localhost"),
                ScriptFrame::new("process.py", "process", 50, None)
                    .with_local("data", "payload")
                    .with_local("retry_count", 3_i64),
            ],
        }
    }
}
