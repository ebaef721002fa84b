use std::collections::{HashMap, VecDeque};

use ndarray::Array2;

/// Pixel adjacency used when grouping foreground pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Connectivity {
    /// Left, right, up, down.
    Four,
    /// Four plus the diagonals.
    #[default]
    Eight,
}

/// Statistics for a single connected component.
#[derive(Clone, Debug)]
pub struct ComponentStats {
    /// Unique label for this component.
    pub label: u32,
    /// Number of pixels in the component.
    pub area: usize,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
}

impl ComponentStats {
    pub fn bbox_width(&self) -> usize {
        self.bbox.3 - self.bbox.2 + 1
    }

    pub fn bbox_height(&self) -> usize {
        self.bbox.1 - self.bbox.0 + 1
    }
}

/// Perform connected component analysis on a binary mask using two-pass
/// labeling with union-find.
///
/// Returns component statistics sorted by area descending (largest first),
/// ties broken by position (top-most, then left-most).
pub fn connected_components(mask: &Array2<bool>, connectivity: Connectivity) -> Vec<ComponentStats> {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return Vec::new();
    }

    let mut labels = Array2::<u32>::zeros((h, w));
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0];

    // Pass 1: assign provisional labels from already-visited neighbors.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let mut current = 0u32;
            for (dr, dc) in visited_neighbors(connectivity) {
                let (Some(nr), Some(nc)) = (row.checked_add_signed(*dr), col.checked_add_signed(*dc)) else {
                    continue;
                };
                if nc >= w {
                    continue;
                }
                let lbl = labels[[nr, nc]];
                if lbl == 0 {
                    continue;
                }
                if current == 0 {
                    current = lbl;
                } else if current != lbl {
                    current = union(&mut parent, current, lbl);
                }
            }

            if current == 0 {
                current = parent.len() as u32;
                parent.push(current);
            }
            labels[[row, col]] = current;
        }
    }

    // Pass 2: resolve labels and collect stats.
    let mut stats_map = HashMap::<u32, ComponentStats>::new();

    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let root = find(&parent, lbl);

            let entry = stats_map.entry(root).or_insert(ComponentStats {
                label: root,
                area: 0,
                bbox: (row, row, col, col),
            });

            entry.area += 1;
            entry.bbox.0 = entry.bbox.0.min(row);
            entry.bbox.1 = entry.bbox.1.max(row);
            entry.bbox.2 = entry.bbox.2.min(col);
            entry.bbox.3 = entry.bbox.3.max(col);
        }
    }

    let mut components: Vec<ComponentStats> = stats_map.into_values().collect();
    components.sort_unstable_by(|a, b| {
        b.area
            .cmp(&a.area)
            .then(a.bbox.0.cmp(&b.bbox.0))
            .then(a.bbox.2.cmp(&b.bbox.2))
    });
    components
}

/// Mark every background pixel that cannot reach the image border as foreground.
///
/// Background is traversed with 4-connectivity, the dual of 8-connected
/// foreground, so a diagonal gap in an 8-connected outline still closes it.
pub fn fill_holes(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut outside = Array2::from_elem((h, w), false);
    let mut queue = VecDeque::new();

    let seed = |row: usize, col: usize, outside: &mut Array2<bool>, queue: &mut VecDeque<(usize, usize)>| {
        if !mask[[row, col]] && !outside[[row, col]] {
            outside[[row, col]] = true;
            queue.push_back((row, col));
        }
    };

    for row in 0..h {
        seed(row, 0, &mut outside, &mut queue);
        if w > 1 {
            seed(row, w - 1, &mut outside, &mut queue);
        }
    }
    for col in 0..w {
        seed(0, col, &mut outside, &mut queue);
        if h > 1 {
            seed(h - 1, col, &mut outside, &mut queue);
        }
    }

    while let Some((row, col)) = queue.pop_front() {
        for (dr, dc) in [(-1isize, 0isize), (1, 0), (0, -1), (0, 1)] {
            let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
                continue;
            };
            if nr < h && nc < w {
                seed(nr, nc, &mut outside, &mut queue);
            }
        }
    }

    outside.mapv(|v| !v)
}

/// Neighbor offsets already visited in raster order.
fn visited_neighbors(connectivity: Connectivity) -> &'static [(isize, isize)] {
    match connectivity {
        Connectivity::Four => &[(-1, 0), (0, -1)],
        Connectivity::Eight => &[(-1, -1), (-1, 0), (-1, 1), (0, -1)],
    }
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

/// Merge two label sets, returning the surviving root.
fn union(parent: &mut [u32], a: u32, b: u32) -> u32 {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra == rb {
        return ra;
    }
    // Merge larger root into smaller root to keep labels consistent.
    let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
    parent[big as usize] = small;
    small
}
