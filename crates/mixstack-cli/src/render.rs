use std::fmt::Write;

use colored::Colorize;
use mixstack_merge::MergeReport;
use mixstack_types::{MergedFrame, ScriptFrame};

/// Render a merged stack as numbered lines, one frame per line, followed by
/// a summary line.
pub fn render_report(report: &MergeReport, show_locals: bool) -> String {
    let mut out = String::new();
    for (index, frame) in report.frames.iter().enumerate() {
        render_frame(&mut out, index, frame, show_locals);
    }
    let _ = writeln!(
        out,
        "{} frames: {} substituted, {} unmatched trampolines, {} appended",
        report.frames.len().to_string().bold(),
        report.substituted,
        report.unmatched_markers,
        report.appended,
    );
    out
}

fn render_frame(out: &mut String, index: usize, frame: &MergedFrame, show_locals: bool) {
    let kind = format!("{:<6}", frame.kind().to_string());
    let _ = match frame {
        MergedFrame::Native(f) => writeln!(
            out,
            "#{index:>2} [{}] {:<30} at {}:{} (ip={})",
            kind.cyan(),
            f.func,
            f.file,
            f.lineno,
            f.ip.dimmed(),
        ),
        MergedFrame::Script(f) => writeln!(
            out,
            "#{index:>2} [{}] {:<30} at {}:{}",
            kind.green(),
            f.func.bold(),
            f.file,
            f.lineno,
        ),
    };
    match frame {
        MergedFrame::Script(f) if show_locals && f.has_locals() => {
            let _ = writeln!(out, "      └─ locals: {}", format_locals(f));
        }
        _ => {}
    }
}

fn format_locals(frame: &ScriptFrame) -> String {
    frame
        .locals
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
