use std::path::PathBuf;

use boxgrid::bitmap;
use boxgrid::config::Params;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let params: Params = match args.get(1) {
        Some(path) => {
            let text = std::fs::read_to_string(path).expect("failed to read params file");
            serde_json::from_str(&text).expect("invalid params JSON")
        }
        None => Params::default(),
    };
    let out_dir: PathBuf = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    std::fs::create_dir_all(&out_dir).expect("failed to create output directory");

    eprintln!(
        "Filtering {}x{} grid with a {}x{} box, stride=({}, {}), parallelism={}",
        params.rows,
        params.cols,
        params.box_rows,
        params.box_cols,
        params.y_stride,
        params.x_stride,
        params.parallelism
    );

    let (report, timings) = match boxgrid::run(&params) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Print timings
    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }
    eprintln!(
        "\nOutput {}x{}, max |naive - cached| = {:e}",
        report.cached_avg.rows, report.cached_avg.cols, report.max_abs_diff
    );

    let save = |name: &str, img: image::GrayImage| {
        let path = out_dir.join(name);
        img.save(&path).expect("failed to save image");
        eprintln!("Saved {}", path.display());
    };

    save("source.png", bitmap::to_luma(&report.source, |v| *v));
    save("boxed_avg.png", bitmap::to_luma(&report.cached_avg, |v| *v));
    save("boxed_sum.png", bitmap::to_luma(&report.cached_sum, |v| *v));

    eprintln!("\nDone.");
}
