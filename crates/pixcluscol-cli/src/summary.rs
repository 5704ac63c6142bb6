use std::path::Path;

use console::Style;
use pixcluscol_core::Annotator;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    name: Style,
    empty: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            name: Style::new().green(),
            empty: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_cluster_summary(file: &Path, annotator: &Annotator, sizes: &[usize]) {
    let s = Styles::new();
    let (h, w) = annotator.shape();
    let total = (h * w).max(1);

    println!();
    println!("  {}", s.title.apply_to("Pixel Clusters"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(14)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Labels"),
        s.path.apply_to(file.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{w}x{h}"))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Clusters"),
        s.value.apply_to(annotator.num_labels())
    );
    println!();

    println!("  {}", s.header.apply_to("Clusters"));
    let names = annotator.label_names();
    let palette = annotator.palette();
    for (i, &size) in sizes.iter().enumerate() {
        let [r, g, b] = palette[i];
        let share = size as f64 * 100.0 / total as f64;
        let count = if size == 0 {
            s.empty.apply_to("empty".to_string())
        } else {
            s.value.apply_to(format!("{size} px ({share:.1}%)"))
        };
        println!(
            "    {:<6}{:<20}{}  {}",
            s.label.apply_to(i),
            s.name.apply_to(&names[i]),
            s.label.apply_to(format!("#{r:02x}{g:02x}{b:02x}")),
            count
        );
    }
    println!();
}
