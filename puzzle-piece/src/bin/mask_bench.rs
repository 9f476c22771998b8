use puzzle_piece::{ImageSource, PieceIndex, PieceMatrix, PuzzleDataSource, PuzzleView, Size, ViewConfig};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

struct Bench {
    matrix: PieceMatrix,
    hump: f32,
    revealed: Rc<RefCell<Vec<PieceIndex>>>,
}

impl PuzzleDataSource for Bench {
    fn matrix_value(&self) -> PieceMatrix { self.matrix.clone() }
    fn hump_width(&self) -> f32 { self.hump }
    fn puzzle_image(&self) -> ImageSource { ImageSource::Image(None) }
    fn discovered_pieces(&self) -> Vec<PieceIndex> { self.revealed.borrow().clone() }
    fn undiscovered_cover_image(&self, _index: PieceIndex) -> Option<ImageSource> { None }
}

// Alternating interior signs, flat border.
fn checker(rows: usize, cols: usize) -> PieceMatrix {
    let h_lines = (0..=rows)
        .map(|i| (0..cols).map(|j| if i == 0 || i == rows { 0 } else if (i + j) % 2 == 0 { 1 } else { -1 }).collect())
        .collect();
    let v_lines = (0..=cols)
        .map(|i| (0..rows).map(|j| if i == 0 || i == cols { 0 } else if (i + j) % 2 == 0 { -1 } else { 1 }).collect())
        .collect();
    PieceMatrix::Custom { h_lines, v_lines }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut grid = 32usize;
    let mut step = 8usize;
    let mut hump = 6.0f32;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--grid=") { if let Ok(v)=val.parse() { grid=v; } }
        else if let Some(val)=a.strip_prefix("--step=") { if let Ok(v)=val.parse() { step=v; } }
        else if let Some(val)=a.strip_prefix("--hump=") { if let Ok(v)=val.parse() { hump=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }
    let grid = grid.max(1);
    let step = step.max(1);
    let total = (grid * grid) as PieceIndex;

    let revealed = Rc::new(RefCell::new(Vec::new()));
    let mut view = PuzzleView::new(ViewConfig::default());
    view.set_size(Size::new(grid as f32 * 40.0, grid as f32 * 40.0));
    view.set_data_source(Box::new(Bench { matrix: checker(grid, grid), hump, revealed: revealed.clone() }));

    let t0 = Instant::now();
    if let Err(e) = view.reload() { eprintln!("FAIL: initial reload: {}", e); std::process::exit(1); }
    let build_ms = t0.elapsed().as_secs_f64() * 1000.0;

    // Reveal `step` pieces per refresh, scattered with an LCG.
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut order: Vec<PieceIndex> = (1..=total).collect();
    for i in (1..order.len()).rev() {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        order.swap(i, (seed >> 33) as usize % (i + 1));
    }
    let mut times_ms: Vec<f64> = Vec::new();
    let start_all = Instant::now();
    for chunk in order.chunks(step) {
        revealed.borrow_mut().extend_from_slice(chunk);
        let t = Instant::now();
        if let Err(e) = view.reload() { eprintln!("FAIL: reload: {}", e); std::process::exit(1); }
        times_ms.push(t.elapsed().as_secs_f64() * 1000.0);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    times_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    println!(
        "grid={}x{} hump={} step={} refreshes={} build_ms={:.3} total_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4} mask={} tiles={}",
        grid, grid, hump, step, times_ms.len(), build_ms, dur_all, med, p90, p99, view.mask().len(), view.pool().active_count()
    );
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
