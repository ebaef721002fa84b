use ndarray::Array2;

use crate::consts::HISTOGRAM_BINS;

/// Contrast-limited adaptive histogram equalization of an 8-bit plane.
///
/// The plane is split into a `tile_grid` x `tile_grid` grid (fewer tiles along
/// an axis shorter than the grid). Each tile gets its own equalization lookup
/// table built from a histogram clipped at `clip_limit * tile_area / 256`;
/// clipped counts are spread uniformly across all bins. Output pixels blend
/// the tables of the four nearest tile centers bilinearly, so tile seams do
/// not show.
pub fn clahe(data: &Array2<u8>, tile_grid: usize, clip_limit: f32) -> Array2<u8> {
    let (h, w) = data.dim();
    if h == 0 || w == 0 || tile_grid == 0 {
        return data.clone();
    }

    let tile_h = h.div_ceil(tile_grid.min(h));
    let tile_w = w.div_ceil(tile_grid.min(w));
    // Recount so that no trailing tile is empty.
    let tiles_y = h.div_ceil(tile_h);
    let tiles_x = w.div_ceil(tile_w);

    let mut luts = Vec::with_capacity(tiles_y * tiles_x);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let row_range = ty * tile_h..((ty + 1) * tile_h).min(h);
            let col_range = tx * tile_w..((tx + 1) * tile_w).min(w);
            luts.push(tile_lut(data, row_range, col_range, clip_limit));
        }
    }

    let lut_at = |ty: usize, tx: usize| &luts[ty * tiles_x + tx];

    Array2::from_shape_fn((h, w), |(row, col)| {
        let v = data[[row, col]] as usize;

        let (ty0, ty1, fy) = neighbor_tiles(row, tile_h, tiles_y);
        let (tx0, tx1, fx) = neighbor_tiles(col, tile_w, tiles_x);

        let top = (1.0 - fx) * lut_at(ty0, tx0)[v] as f32 + fx * lut_at(ty0, tx1)[v] as f32;
        let bottom = (1.0 - fx) * lut_at(ty1, tx0)[v] as f32 + fx * lut_at(ty1, tx1)[v] as f32;
        let out = (1.0 - fy) * top + fy * bottom;
        out.round().clamp(0.0, 255.0) as u8
    })
}

/// Indices of the two tiles whose centers bracket `pos`, and the blend weight of the second.
fn neighbor_tiles(pos: usize, tile_size: usize, tiles: usize) -> (usize, usize, f32) {
    let t = (pos as f32 + 0.5) / tile_size as f32 - 0.5;
    let t0 = t.floor();
    let frac = t - t0;
    let last = tiles as isize - 1;
    let i0 = (t0 as isize).clamp(0, last) as usize;
    let i1 = (t0 as isize + 1).clamp(0, last) as usize;
    (i0, i1, frac)
}

/// Build the clipped-histogram equalization table of one tile.
fn tile_lut(
    data: &Array2<u8>,
    rows: std::ops::Range<usize>,
    cols: std::ops::Range<usize>,
    clip_limit: f32,
) -> [u8; HISTOGRAM_BINS] {
    let mut hist = [0usize; HISTOGRAM_BINS];
    for row in rows.clone() {
        for col in cols.clone() {
            hist[data[[row, col]] as usize] += 1;
        }
    }

    let area = rows.len() * cols.len();
    clip_histogram(&mut hist, clip_limit, area);

    let scale = (HISTOGRAM_BINS - 1) as f32 / area as f32;
    let mut lut = [0u8; HISTOGRAM_BINS];
    let mut cdf = 0usize;
    for (i, &count) in hist.iter().enumerate() {
        cdf += count;
        lut[i] = (cdf as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Clip every bin at the limit and redistribute the excess uniformly.
///
/// Bin counts always sum to `area` afterwards.
fn clip_histogram(hist: &mut [usize; HISTOGRAM_BINS], clip_limit: f32, area: usize) {
    if clip_limit <= 0.0 {
        return;
    }
    let limit = ((clip_limit * area as f32 / HISTOGRAM_BINS as f32) as usize).max(1);

    let mut excess = 0usize;
    for count in hist.iter_mut() {
        if *count > limit {
            excess += *count - limit;
            *count = limit;
        }
    }

    let batch = excess / HISTOGRAM_BINS;
    let mut residual = excess % HISTOGRAM_BINS;
    for count in hist.iter_mut() {
        *count += batch;
    }
    if residual > 0 {
        let step = (HISTOGRAM_BINS / residual).max(1);
        let mut i = 0;
        while i < HISTOGRAM_BINS && residual > 0 {
            hist[i] += 1;
            residual -= 1;
            i += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipped_histogram_keeps_total() {
        let mut hist = [0usize; HISTOGRAM_BINS];
        hist[10] = 900;
        hist[200] = 124;
        clip_histogram(&mut hist, 3.0, 1024);
        assert_eq!(hist.iter().sum::<usize>(), 1024);
        assert!(hist[10] < 900);
    }

    #[test]
    fn neighbor_tiles_clamp_at_edges() {
        let (a, b, _) = neighbor_tiles(0, 10, 4);
        assert_eq!((a, b), (0, 0));
        let (a, b, frac) = neighbor_tiles(15, 10, 4);
        assert_eq!((a, b), (1, 2));
        assert!(frac < 0.1);
        let (a, b, _) = neighbor_tiles(39, 10, 4);
        assert_eq!((a, b), (3, 3));
    }
}
