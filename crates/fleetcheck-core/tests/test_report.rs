use std::path::PathBuf;

use chrono::NaiveDate;
use fleetcheck_core::frame::Region;
use fleetcheck_core::inspection::{
    render_report, report_file_name, write_report, Findings, InspectionSession, VideoFindings,
};
use fleetcheck_core::pipeline::{Angle, AngleResult, AngleStatus, Severity};

fn session(findings: Findings) -> InspectionSession {
    InspectionSession {
        vehicle_id: "KA01".into(),
        inspector: "Ayse".into(),
        date: NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(16, 5, 0)
            .unwrap(),
        findings,
        report_path: None,
    }
}

fn angle_result(angle: Angle, status: AngleStatus) -> AngleResult {
    let regions = match status {
        AngleStatus::Changed { regions } => vec![
            Region {
                x: 1,
                y: 2,
                width: 30,
                height: 30,
                area: 900,
            };
            regions
        ],
        _ => Vec::new(),
    };
    AngleResult {
        angle,
        status,
        annotated_path: status
            .is_changed()
            .then(|| PathBuf::from(format!("annotated/annotated_{}_KA01.png", angle.as_str()))),
        score: regions.len(),
        regions,
        note: String::new(),
        severity: Severity::None,
    }
}

#[test]
fn test_photo_report() {
    let results = vec![
        angle_result(Angle::Front, AngleStatus::Changed { regions: 2 })
            .with_note("scratch on bumper")
            .with_severity(Severity::High),
        angle_result(Angle::Rear, AngleStatus::Clean),
        angle_result(Angle::Right, AngleStatus::FirstRecord),
    ];
    let text = render_report(&session(Findings::Angles(results)));

    assert!(text.starts_with("# Damage Report - KA01\n"));
    assert!(text.contains("- **Date:** 2026-03-14 16:05"));
    assert!(text.contains("- **Inspector:** Ayse"));
    assert!(text.contains("- **Overall:** Damaged (2 damage points)"));
    assert!(text.contains("## Front"));
    assert!(text.contains("- **Status:** Changed (2 regions)"));
    assert!(text.contains("- **Note:** scratch on bumper"));
    assert!(text.contains("- **Severity:** High"));
    assert!(text.contains("![Front](annotated/annotated_front_KA01.png)"));
    assert!(text.contains("## Rear"));
    assert!(text.contains("- **Status:** Clean"));
    assert!(text.contains("## Right Side"));
    assert!(text.contains("- **Status:** First record"));
}

#[test]
fn test_video_report() {
    let video = VideoFindings {
        damage_detected: true,
        max_difference_score: 40_000,
        threshold: 15_000,
        pairs_compared: 10,
        best_frame_index: Some(3),
        regions: Vec::new(),
        best_frame_path: Some(PathBuf::from("evidence/KA01_best_frame.png")),
        best_mask_path: Some(PathBuf::from("evidence/KA01_best_mask.png")),
        best_annotated_path: None,
    };
    let text = render_report(&session(Findings::Video(video)));

    assert!(text.contains("## Video scan"));
    assert!(text.contains("- **Verdict:** Damage detected"));
    assert!(text.contains("- **Max difference score:** 40000 (threshold 15000)"));
    assert!(text.contains("- **Best frame:** 3"));
    assert!(text.contains("![Best frame](evidence/KA01_best_frame.png)"));
    assert!(text.contains("![Change mask](evidence/KA01_best_mask.png)"));
}

#[test]
fn test_report_file_name_and_write() {
    let s = session(Findings::Angles(vec![angle_result(Angle::Left, AngleStatus::Clean)]));
    assert_eq!(report_file_name(&s), "Report_KA01_2026-03-14.md");

    let dir = tempfile::tempdir().unwrap();
    let path = write_report(&s, &dir.path().join("reports")).unwrap();
    assert_eq!(path, dir.path().join("reports").join("Report_KA01_2026-03-14.md"));
    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.contains("- **Overall:** Clean (0 damage points)"));
    assert!(written.contains("## Left Side"));
}

#[test]
fn test_written_report_links_are_relative() {
    let dir = tempfile::tempdir().unwrap();
    let mut result = angle_result(Angle::Front, AngleStatus::Changed { regions: 1 });
    result.annotated_path = Some(dir.path().join("annotated").join("KA01_20260314-160500").join("front.png"));
    let s = session(Findings::Angles(vec![result]));

    let path = write_report(&s, &dir.path().join("reports")).unwrap();
    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.contains("![Front](../annotated/KA01_20260314-160500/front.png)"));

    // Rendering alone keeps the recorded path.
    let rendered = render_report(&s);
    assert!(rendered.contains(&format!(
        "![Front]({})",
        dir.path().join("annotated").join("KA01_20260314-160500").join("front.png").display()
    )));
}
