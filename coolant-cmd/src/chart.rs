use coolant_chart::write_trend_svg;
use coolant_core::chemistry::Targets;
use coolant_db::Database;
use std::path::Path;

pub fn run_chart(
    db: &Database,
    shop: &str,
    machine: &str,
    output: &Path,
    targets: &Targets,
) -> anyhow::Result<()> {
    let points = db.query_trend(shop, machine)?;
    if points.is_empty() {
        anyhow::bail!("no readings recorded for {} / {}", shop, machine);
    }
    let title = format!("{} / {}", shop, machine);
    write_trend_svg(output, &title, &points, targets)?;
    println!("Wrote {} visits to {}", points.len(), output.display());
    Ok(())
}
