use image::Rgb;

use crate::frame::{Capture, ChangeMask, Region};

use super::annotate::draw_region;
use super::components::{connected_components, fill_holes, Connectivity};
use super::config::RegionConfig;

/// Regions found in a change mask, plus the overlay when any were found.
#[derive(Clone, Debug)]
pub struct RegionExtraction {
    /// Largest first.
    pub regions: Vec<Region>,
    /// Copy of the annotation frame with every region boxed; `None` when no region survived.
    pub annotated: Option<Capture>,
}

impl RegionExtraction {
    pub fn count(&self) -> usize {
        self.regions.len()
    }
}

/// Find the regions of a mask without rendering anything.
///
/// Regions are the outer boundaries of 8-connected changed pixels: holes are
/// filled first, so an island inside a ring belongs to the ring's region and
/// `area` counts every enclosed pixel. Only regions with `area > min_area`
/// are returned.
pub fn find_regions(mask: &ChangeMask, min_area: usize) -> Vec<Region> {
    let filled = fill_holes(&mask.data);
    connected_components(&filled, Connectivity::Eight)
        .into_iter()
        .filter(|c| c.area > min_area)
        .map(|c| Region {
            x: c.bbox.2 as u32,
            y: c.bbox.0 as u32,
            width: c.bbox_width() as u32,
            height: c.bbox_height() as u32,
            area: c.area,
        })
        .collect()
}

/// Extract regions from `mask` and box them on a copy of `annotate_onto`.
///
/// `annotate_onto` is used only for visualization and is never modified.
pub fn extract_regions(mask: &ChangeMask, annotate_onto: &Capture, config: &RegionConfig) -> RegionExtraction {
    let regions = find_regions(mask, config.min_area);
    if regions.is_empty() {
        return RegionExtraction {
            regions,
            annotated: None,
        };
    }

    let mut annotated = annotate_onto.clone();
    let color = Rgb(config.box_color);
    for region in &regions {
        draw_region(&mut annotated.pixels, region, color, config.box_thickness);
    }

    RegionExtraction {
        regions,
        annotated: Some(annotated),
    }
}
