use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::info;

use crate::error::Result;

use super::session::{Findings, InspectionSession, VideoFindings};

/// Markdown damage report for a session.
///
/// Image links are written as recorded in the session unless a link base is
/// set, in which case they are made relative to that directory.
pub struct Report<'a> {
    session: &'a InspectionSession,
    link_base: Option<PathBuf>,
}

impl<'a> Report<'a> {
    pub fn new(session: &'a InspectionSession) -> Self {
        Self {
            session,
            link_base: None,
        }
    }

    /// Resolve image links from `dir`, the directory the report is saved in.
    pub fn linked_from(session: &'a InspectionSession, dir: &Path) -> Result<Self> {
        Ok(Self {
            session,
            link_base: Some(std::path::absolute(dir)?),
        })
    }

    fn link(&self, target: &Path) -> String {
        match &self.link_base {
            Some(base) => relative_link(base, target),
            None => target.display().to_string(),
        }
    }
}

/// Lexical path from `base` to `target`, `/`-separated.
///
/// Falls back to the absolute target when `base` cannot be walked up
/// lexically.
fn relative_link(base: &Path, target: &Path) -> String {
    let target = std::path::absolute(target).unwrap_or_else(|_| target.to_path_buf());
    let base_parts: Vec<Component> = base.components().collect();
    let target_parts: Vec<Component> = target.components().collect();
    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let rest = &base_parts[common..];
    if common == 0 || rest.iter().any(|c| !matches!(c, Component::Normal(_))) {
        return target.display().to_string();
    }

    let ups = std::iter::repeat("..".to_string()).take(rest.len());
    let downs = target_parts[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned());
    ups.chain(downs).collect::<Vec<_>>().join("/")
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.session;
        writeln!(f, "# Damage Report - {}", session.vehicle_id)?;
        writeln!(f)?;
        writeln!(f, "- **Date:** {}", session.date.format("%Y-%m-%d %H:%M"))?;
        writeln!(f, "- **Inspector:** {}", session.inspector)?;
        let verdict = if session.is_damaged() { "Damaged" } else { "Clean" };
        writeln!(
            f,
            "- **Overall:** {verdict} ({} damage points)",
            session.damage_points()
        )?;

        match &session.findings {
            Findings::Angles(results) => {
                for result in results {
                    writeln!(f)?;
                    writeln!(f, "## {}", result.angle)?;
                    writeln!(f)?;
                    writeln!(f, "- **Status:** {}", result.status)?;
                    if !result.note.is_empty() {
                        writeln!(f, "- **Note:** {}", result.note)?;
                    }
                    writeln!(f, "- **Severity:** {}", result.severity)?;
                    if let Some(path) = &result.annotated_path {
                        writeln!(f)?;
                        writeln!(f, "![{}]({})", result.angle, self.link(path))?;
                    }
                }
            }
            Findings::Video(video) => self.write_video(f, video)?,
        }
        Ok(())
    }
}

impl Report<'_> {
    fn write_video(&self, f: &mut fmt::Formatter<'_>, video: &VideoFindings) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "## Video scan")?;
        writeln!(f)?;
        let verdict = if video.damage_detected { "Damage detected" } else { "No damage" };
        writeln!(f, "- **Verdict:** {verdict}")?;
        writeln!(
            f,
            "- **Max difference score:** {} (threshold {})",
            video.max_difference_score, video.threshold
        )?;
        writeln!(f, "- **Frame pairs compared:** {}", video.pairs_compared)?;
        if let Some(index) = video.best_frame_index {
            writeln!(f, "- **Best frame:** {index}")?;
        }
        if !video.regions.is_empty() {
            writeln!(f, "- **Regions:** {}", video.regions.len())?;
        }

        let images = [
            (
                "Best frame",
                video.best_annotated_path.as_ref().or(video.best_frame_path.as_ref()),
            ),
            ("Change mask", video.best_mask_path.as_ref()),
        ];
        for (label, path) in images {
            if let Some(path) = path {
                writeln!(f)?;
                writeln!(f, "![{label}]({})", self.link(path))?;
            }
        }
        Ok(())
    }
}

pub fn render_report(session: &InspectionSession) -> String {
    Report::new(session).to_string()
}

/// File name for a session's report: `Report_<VEHICLE>_<YYYY-MM-DD>.md`.
pub fn report_file_name(session: &InspectionSession) -> String {
    format!(
        "Report_{}_{}.md",
        session.vehicle_id,
        session.date.format("%Y-%m-%d")
    )
}

/// Render and write the report into `dir`, returning its path.
///
/// Image links in the written file resolve from `dir`.
pub fn write_report(session: &InspectionSession, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(session));
    let report = Report::linked_from(session, dir)?;
    fs::write(&path, report.to_string())?;
    info!(path = %path.display(), "Report written");
    Ok(path)
}
