use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Smallest box enclosing a set of points. Returns `None` for an empty set.
    pub fn enclosing(points: &[imageproc::point::Point<i32>]) -> Option<Self> {
        let first = points.first()?;
        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.x;
        let mut max_y = first.y;

        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        // Contour tracing yields in-image coordinates, so never negative.
        let x = min_x.max(0) as u32;
        let y = min_y.max(0) as u32;

        Some(Self {
            x,
            y,
            width: (max_x.max(0) as u32).saturating_sub(x) + 1,
            height: (max_y.max(0) as u32).saturating_sub(y) + 1,
        })
    }

    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// The estimation method the selector ended up trusting.
///
/// A closed set: callers branch on the variant instead of matching
/// display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountMethod {
    HoughCircles,
    ContourCca,
    Watershed,
}

impl CountMethod {
    /// Human-readable label, matching what the counting service reports.
    pub fn label(&self) -> &'static str {
        match self {
            CountMethod::HoughCircles => "Hough Circles",
            CountMethod::ContourCca => "Contour Analysis / CCA",
            CountMethod::Watershed => "Watershed Algorithm",
        }
    }
}

impl std::fmt::Display for CountMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Every individual estimate computed for one image, kept around so callers
/// can inspect how much the estimators disagreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountEstimates {
    /// Number of outer contours in the binary mask.
    pub contours: u32,
    /// Number of 8-connected foreground components (background excluded).
    pub components: u32,
    /// Number of circles found by the Hough search.
    pub circles: u32,
    /// Watershed separation count; `None` when the cheap estimators agreed
    /// and the separator was never run.
    pub watershed: Option<u32>,
}

/// Final output of the object-counting pipeline.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The count the selector settled on.
    pub count: u32,
    /// Which method produced it.
    pub method: CountMethod,
    /// All individual estimates computed for this image.
    pub estimates: CountEstimates,
    /// Bounding boxes of the outer contours, also drawn on `annotated`.
    pub regions: Vec<BoundingBox>,
    /// Copy of the input with contour bounding boxes drawn on it.
    pub annotated: RgbImage,
}

/// Final output of the empty-space pipeline.
#[derive(Debug, Clone)]
pub struct EmptySpaceResult {
    /// Number of distinct empty regions.
    pub count: u32,
    /// Bounding boxes of the empty regions.
    pub regions: Vec<BoundingBox>,
    /// Copy of the input with empty-region bounding boxes drawn on it.
    pub annotated: RgbImage,
}
