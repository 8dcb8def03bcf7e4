use std::path::Path;

use console::Style;
use cardlens_core::alignment::AlignmentSettings;
use cardlens_core::diff::DiffStats;
use cardlens_core::geometry::Point;
use cardlens_core::transform::CssTransform;
use cardlens_core::viewport::ViewportState;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    good: Style,
    warn: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            warn: Style::new().yellow(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title
            .apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

fn fmt_point(p: Point) -> String {
    format!("({:.2}, {:.2})", p.x, p.y)
}

fn print_alignment_section(s: &Styles, alignment: &AlignmentSettings) {
    println!("  {}", s.header.apply_to("Alignment"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Scale"),
        s.value
            .apply_to(format!("{:.3} x {:.3}", alignment.scale_x, alignment.scale_y))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Offset"),
        s.value.apply_to(fmt_point(alignment.offset()))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Rotate"),
        s.value.apply_to(format!("{:.2}\u{b0}", alignment.rotate))
    );
    match alignment.pivot {
        Some(p) => println!(
            "    {:<12}{}",
            s.label.apply_to("Pivot"),
            s.value.apply_to(format!("({:.3}, {:.3})", p.x, p.y))
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Pivot"),
            s.disabled.apply_to("center")
        ),
    }
    println!();
}

pub fn print_diff_summary(alignment: &AlignmentSettings, stats: &DiffStats, output: &Path) {
    let s = Styles::new();
    print_title(&s, "Difference");

    print_alignment_section(&s, alignment);

    println!("  {}", s.header.apply_to("Statistics"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Overlap"),
        s.value.apply_to(format!("{} px", stats.covered_pixels))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Mean"),
        s.value
            .apply_to(format!("{:.2}%", stats.mean_difference * 100.0))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Max"),
        s.value
            .apply_to(format!("{:.2}%", stats.max_difference * 100.0))
    );
    let mismatch = format!("{:.2}%", stats.mismatch_fraction * 100.0);
    let styled = if stats.mismatch_fraction < 0.05 {
        s.good.apply_to(mismatch)
    } else {
        s.warn.apply_to(mismatch)
    };
    println!("    {:<12}{}", s.label.apply_to("Mismatch"), styled);
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Saved"),
        s.path.apply_to(output.display())
    );
    println!();
}

pub fn print_center_summary(
    before: &AlignmentSettings,
    after: &AlignmentSettings,
    viewport: &ViewportState,
) {
    let s = Styles::new();
    print_title(&s, "Recentered");

    println!(
        "  {:<14}{} -> {}",
        s.label.apply_to("Offset"),
        s.value.apply_to(fmt_point(before.offset())),
        s.good.apply_to(fmt_point(after.offset()))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Zoom"),
        s.value.apply_to(format!("{:.3}", viewport.zoom))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Pan"),
        s.value.apply_to(fmt_point(viewport.pan))
    );
    println!();
}

pub fn print_placement_summary(
    alignment: &AlignmentSettings,
    css: &CssTransform,
    outline: &[Point; 4],
) {
    let s = Styles::new();
    print_title(&s, "Placement");

    print_alignment_section(&s, alignment);

    println!("  {}", s.header.apply_to("Element"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Box"),
        s.value.apply_to(format!(
            "left {:.2}px, top {:.2}px, {:.2} x {:.2}",
            css.left, css.top, css.size.width, css.size.height
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Transform"),
        s.value.apply_to(css)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Origin"),
        s.value.apply_to(css.origin())
    );
    println!();

    println!("  {}", s.header.apply_to("Outline"));
    for (name, corner) in ["top-left", "top-right", "bottom-right", "bottom-left"]
        .iter()
        .zip(outline)
    {
        println!(
            "    {:<14}{}",
            s.label.apply_to(name),
            s.value.apply_to(fmt_point(*corner))
        );
    }
    println!();
}
