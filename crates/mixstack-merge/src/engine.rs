//! The stack merge pass.
//!
//! Native sampling cannot see through the interpreter, so every trampoline
//! frame stands in for exactly one script frame captured separately. The
//! engine walks the native stack once, handing out script frames in order as
//! trampolines are met.

use mixstack_types::{MergedFrame, NativeFrame, ScriptFrame};
use tracing::{debug, trace};

use crate::config::MergeConfig;
use crate::error::ConfigResult;
use crate::marker::Marker;

/// The result of one merge, with counts describing how the inputs lined up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeReport {
    /// The merged stack, in the caller's ordering convention.
    pub frames: Vec<MergedFrame>,
    /// Trampoline frames replaced by a script frame.
    pub substituted: usize,
    /// Trampoline frames kept as native frames because no script frame was left.
    pub unmatched_markers: usize,
    /// Script frames appended after the native stack for lack of a trampoline.
    pub appended: usize,
}

impl MergeReport {
    /// Number of native frames present in the output.
    pub fn native_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_native()).count()
    }

    /// Number of script frames present in the output.
    pub fn script_count(&self) -> usize {
        self.substituted + self.appended
    }

    /// Returns `true` if every trampoline was matched and no script frame
    /// had to be appended.
    pub fn is_exact(&self) -> bool {
        self.unmatched_markers == 0 && self.appended == 0
    }
}

/// An immutable merge engine.
///
/// Holds the set of trampoline markers and nothing else; merging never
/// touches engine state, so one engine can be shared freely across threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeEngine {
    markers: Vec<Marker>,
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new(Marker::default())
    }
}

impl MergeEngine {
    /// Create an engine recognizing a single marker.
    pub fn new(marker: Marker) -> Self {
        Self {
            markers: vec![marker],
        }
    }

    /// Recognize an additional marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    /// Build an engine from a validated configuration.
    pub fn from_config(config: &MergeConfig) -> ConfigResult<Self> {
        config.validate()?;
        let mut markers: Vec<Marker> = Vec::with_capacity(config.markers.len());
        for name in &config.markers {
            let marker = Marker::new(name.as_str());
            if !markers.contains(&marker) {
                markers.push(marker);
            }
        }
        Ok(Self { markers })
    }

    /// The markers this engine recognizes.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Returns `true` if `frame` is an interpreter trampoline.
    pub fn is_marker(&self, frame: &NativeFrame) -> bool {
        self.markers.iter().any(|m| m.matches(frame))
    }

    /// Merge the two snapshots into one stack.
    ///
    /// Both inputs must use the same ordering convention (top-first or
    /// bottom-first); the output follows it. See [`Self::merge_with_report`].
    pub fn merge(&self, script: &[ScriptFrame], native: &[NativeFrame]) -> Vec<MergedFrame> {
        self.merge_with_report(script, native).frames
    }

    /// Merge the two snapshots and report how they lined up.
    ///
    /// Each marker frame in `native` is replaced by the next unused frame of
    /// `script`. Markers met after `script` is exhausted stay as native
    /// frames; script frames left over after the pass are appended in order.
    /// Field contents are never inspected beyond the marker comparison.
    pub fn merge_with_report(&self, script: &[ScriptFrame], native: &[NativeFrame]) -> MergeReport {
        let mut frames = Vec::with_capacity(native.len() + script.len());
        let mut cursor = 0;
        let mut unmatched_markers = 0;

        for frame in native {
            if self.is_marker(frame) {
                if let Some(script_frame) = script.get(cursor) {
                    frames.push(MergedFrame::Script(script_frame.clone()));
                    cursor += 1;
                    continue;
                }
                unmatched_markers += 1;
            }
            frames.push(MergedFrame::Native(frame.clone()));
        }

        let substituted = cursor;
        let rest = &script[cursor..];
        frames.extend(rest.iter().cloned().map(MergedFrame::Script));

        if unmatched_markers > 0 {
            trace!(unmatched_markers, "trampoline frames left without a script frame");
        }
        if !rest.is_empty() {
            trace!(appended = rest.len(), "script frames appended after native stack");
        }
        debug!(
            native = native.len(),
            script = script.len(),
            substituted,
            unmatched_markers,
            appended = rest.len(),
            "merged stacks"
        );

        MergeReport {
            frames,
            substituted,
            unmatched_markers,
            appended: rest.len(),
        }
    }
}

/// Merge with the default marker (`PyEval_EvalFrameDefault`).
pub fn merge(script: &[ScriptFrame], native: &[NativeFrame]) -> Vec<MergedFrame> {
    MergeEngine::default().merge(script, native)
}
