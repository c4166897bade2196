use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::value::{LocalValue, Locals};

/// A frame captured from native code by the sampling layer.
///
/// All fields are stored exactly as the capture layer produced them. The
/// instruction pointer is kept as its hex-formatted string; nothing parses or
/// normalizes it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeFrame {
    /// Hex-formatted instruction pointer (e.g. `0x7f3a1c2b`).
    pub ip: String,
    /// Source file the symbolizer attributed the frame to.
    pub file: String,
    /// Resolved function name.
    pub func: String,
    /// Source line number.
    pub lineno: i64,
}

impl NativeFrame {
    /// Create a native frame, copying every input verbatim.
    pub fn new(
        ip: impl Into<String>,
        file: impl Into<String>,
        func: impl Into<String>,
        lineno: i64,
    ) -> Self {
        Self {
            ip: ip.into(),
            file: file.into(),
            func: func.into(),
            lineno,
        }
    }
}

impl fmt::Display for NativeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}:{} (ip={})",
            self.func, self.file, self.lineno, self.ip
        )
    }
}

/// A frame captured from the scripting runtime's own introspection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Script source file.
    pub file: String,
    /// Function (code object) name.
    pub func: String,
    /// Line currently executing in this frame.
    pub lineno: i64,
    /// Local variables at capture time. Empty when none were supplied,
    /// whether the key is absent or `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locals: Locals,
}

impl ScriptFrame {
    /// Create a script frame, copying every input verbatim.
    ///
    /// When `locals` is `None` the frame stores an empty map, so the result is
    /// equal to one built with `Some(Locals::new())`.
    pub fn new(
        file: impl Into<String>,
        func: impl Into<String>,
        lineno: i64,
        locals: Option<Locals>,
    ) -> Self {
        Self {
            file: file.into(),
            func: func.into(),
            lineno,
            locals: locals.unwrap_or_default(),
        }
    }

    /// Append a local variable, keeping insertion order.
    ///
    /// Re-inserting an existing name replaces its value in place.
    pub fn with_local(mut self, name: impl Into<String>, value: impl Into<LocalValue>) -> Self {
        self.locals.insert(name.into(), value.into());
        self
    }

    /// Returns `true` if the frame carries any locals.
    pub fn has_locals(&self) -> bool {
        !self.locals.is_empty()
    }
}

impl fmt::Display for ScriptFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.func, self.file, self.lineno)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Locals, D::Error> {
    Ok(Option::<Locals>::deserialize(deserializer)?.unwrap_or_default())
}

/// Build a [`NativeFrame`]. Equivalent to [`NativeFrame::new`].
pub fn make_native_frame(
    ip: impl Into<String>,
    file: impl Into<String>,
    func: impl Into<String>,
    lineno: i64,
) -> NativeFrame {
    NativeFrame::new(ip, file, func, lineno)
}

/// Build a [`ScriptFrame`]. Equivalent to [`ScriptFrame::new`].
pub fn make_script_frame(
    file: impl Into<String>,
    func: impl Into<String>,
    lineno: i64,
    locals: Option<Locals>,
) -> ScriptFrame {
    ScriptFrame::new(file, func, lineno, locals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_frame_copies_fields() {
        let frame = make_native_frame("0x12345678", "test.c", "main", 42);
        assert_eq!(frame.ip, "0x12345678");
        assert_eq!(frame.file, "test.c");
        assert_eq!(frame.func, "main");
        assert_eq!(frame.lineno, 42);
    }

    #[test]
    fn native_frame_does_not_validate() {
        let frame = NativeFrame::new("not-hex", "", "", -7);
        assert_eq!(frame.ip, "not-hex");
        assert!(frame.file.is_empty());
        assert!(frame.func.is_empty());
        assert_eq!(frame.lineno, -7);
    }

    #[test]
    fn script_frame_absent_locals_is_empty_map() {
        let frame = make_script_frame("test.py", "my_function", 10, None);
        assert!(frame.locals.is_empty());
        assert!(!frame.has_locals());
        assert_eq!(frame, make_script_frame("test.py", "my_function", 10, Some(Locals::new())));
    }

    #[test]
    fn script_frame_keeps_locals_in_order() {
        let mut locals = Locals::new();
        locals.insert("x".into(), LocalValue::Int(42));
        locals.insert("name".into(), LocalValue::from("test"));
        locals.insert("flag".into(), LocalValue::Bool(true));

        let frame = make_script_frame("test.py", "another_function", 20, Some(locals));
        assert_eq!(frame.func, "another_function");
        assert_eq!(frame.lineno, 20);
        assert_eq!(frame.locals["x"], LocalValue::Int(42));
        assert_eq!(frame.locals["name"], LocalValue::String("test".into()));
        assert_eq!(frame.locals["flag"], LocalValue::Bool(true));

        let names: Vec<&str> = frame.locals.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["x", "name", "flag"]);
    }

    #[test]
    fn with_local_builder() {
        let frame = ScriptFrame::new("app.py", "run", 10, None)
            .with_local("server", "http://localhost")
            .with_local("retries", 3_i64)
            .with_local("server", "http://remote");
        assert_eq!(frame.locals.len(), 2);
        assert_eq!(frame.locals.get_index(0).map(|(k, _)| k.as_str()), Some("server"));
        assert_eq!(frame.locals["server"], LocalValue::from("http://remote"));
    }

    #[test]
    fn display_formats() {
        let native = NativeFrame::new("0xdeadbeef", "/usr/src/app/main.c", "process_request", 142);
        assert_eq!(
            native.to_string(),
            "process_request at /usr/src/app/main.c:142 (ip=0xdeadbeef)"
        );

        let script = ScriptFrame::new("/app/server.py", "handle_connection", 87, None);
        assert_eq!(script.to_string(), "handle_connection at /app/server.py:87");
    }

    #[test]
    fn script_frame_deserializes_without_locals() {
        let frame: ScriptFrame =
            serde_json::from_str(r#"{"file": "a.py", "func": "f", "lineno": 1}"#).unwrap();
        assert_eq!(frame, ScriptFrame::new("a.py", "f", 1, None));
    }

    #[test]
    fn script_frame_deserializes_null_locals() {
        let frame: ScriptFrame = serde_json::from_str(
            r#"{"file": "a.py", "func": "f", "lineno": 1, "locals": null}"#,
        )
        .unwrap();
        assert!(frame.locals.is_empty());
        assert_eq!(frame, ScriptFrame::new("a.py", "f", 1, None));
    }
}
