use console::Style;
use fleetcheck_core::frame::Region;
use fleetcheck_core::inspection::{
    Findings, HistoryRecord, InspectionSession, Overall, VideoFindings,
};
use fleetcheck_core::pipeline::{AngleResult, AngleStatus};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    clean: Style,
    damaged: Style,
    first: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            clean: Style::new().green(),
            damaged: Style::new().red().bold(),
            first: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

fn status_style<'a>(s: &'a Styles, status: &AngleStatus) -> &'a Style {
    match status {
        AngleStatus::FirstRecord => &s.first,
        AngleStatus::Clean => &s.clean,
        AngleStatus::Changed { .. } => &s.damaged,
    }
}

pub fn print_session(session: &InspectionSession) {
    let s = Styles::new();
    print_title(&s, &format!("Inspection {}", session.vehicle_id));

    println!(
        "  {:<14}{}",
        s.label.apply_to("Date"),
        s.value.apply_to(session.date.format("%Y-%m-%d %H:%M"))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Inspector"),
        s.value.apply_to(&session.inspector)
    );
    let overall = if session.is_damaged() {
        s.damaged.apply_to(format!("Damaged ({} damage points)", session.damage_points()))
    } else {
        s.clean.apply_to("Clean".to_string())
    };
    println!("  {:<14}{}", s.label.apply_to("Overall"), overall);
    println!();

    match &session.findings {
        Findings::Angles(results) => {
            for result in results {
                print_angle(&s, result);
            }
        }
        Findings::Video(video) => print_video_section(&s, video),
    }

    if let Some(path) = &session.report_path {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Report"),
            s.path.apply_to(path.display())
        );
        println!();
    }
}

fn print_angle(s: &Styles, result: &AngleResult) {
    println!("  {}", s.header.apply_to(result.angle));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Status"),
        status_style(s, &result.status).apply_to(result.status)
    );
    if !result.note.is_empty() {
        println!("    {:<12}{}", s.label.apply_to("Note"), result.note);
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Severity"),
        s.value.apply_to(result.severity)
    );
    if let Some(path) = &result.annotated_path {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Annotated"),
            s.path.apply_to(path.display())
        );
    }
    println!();
}

fn print_video_section(s: &Styles, video: &VideoFindings) {
    println!("  {}", s.header.apply_to("Video scan"));
    let verdict = if video.damage_detected {
        s.damaged.apply_to("Damage detected")
    } else {
        s.clean.apply_to("No damage")
    };
    println!("    {:<12}{}", s.label.apply_to("Verdict"), verdict);
    println!(
        "    {:<12}{}",
        s.label.apply_to("Max score"),
        s.value.apply_to(format!(
            "{} (threshold {})",
            video.max_difference_score, video.threshold
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Pairs"),
        s.value.apply_to(video.pairs_compared)
    );
    if let Some(index) = video.best_frame_index {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Best frame"),
            s.value.apply_to(index)
        );
    }
    let evidence = [
        ("Frame", &video.best_frame_path),
        ("Mask", &video.best_mask_path),
        ("Annotated", &video.best_annotated_path),
    ];
    for (label, path) in evidence {
        if let Some(path) = path {
            println!(
                "    {:<12}{}",
                s.label.apply_to(label),
                s.path.apply_to(path.display())
            );
        }
    }
    println!();
}

pub fn print_regions(regions: &[Region]) {
    let s = Styles::new();
    if regions.is_empty() {
        println!("  {}", s.clean.apply_to("No changed regions"));
        return;
    }
    println!("  {}", s.header.apply_to("Regions"));
    for (i, r) in regions.iter().enumerate() {
        println!(
            "    {}. {}",
            s.label.apply_to(i + 1),
            s.value.apply_to(format!(
                "{}x{} at ({}, {}), {} px",
                r.width, r.height, r.x, r.y, r.area
            ))
        );
    }
}

pub fn print_history(vehicle_id: &str, records: &[HistoryRecord]) {
    let s = Styles::new();
    print_title(&s, &format!("History {vehicle_id}"));

    if records.is_empty() {
        println!("  {}", s.first.apply_to("No inspections recorded"));
        println!();
        return;
    }
    for record in records {
        let overall = if record.overall == Overall::Damaged {
            s.damaged.apply_to(record.overall)
        } else {
            s.clean.apply_to(record.overall)
        };
        println!(
            "  {}  {:<6} {:<16} {:>4} pts  {}",
            s.value.apply_to(record.date.format("%Y-%m-%d %H:%M")),
            record.kind.to_string(),
            record.inspector,
            record.damage_points,
            overall
        );
    }
    println!();
}
