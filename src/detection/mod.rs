pub mod annotate;
pub mod circles;
pub mod contours;
pub mod empty_space;
pub mod preprocessing;
pub mod watershed;

use image::DynamicImage;

use crate::config::CountingConfig;
use crate::error::CountError;
use crate::models::{CountEstimates, CountMethod, ProcessingResult};

pub use empty_space::EmptySpaceDetector;

/// Main object-counting orchestrator.
///
/// Derives several independent count estimates from one image and arbitrates
/// among them: a binary mask feeds the contour and connected-component
/// estimators, the raw image feeds an independent Hough circle search, and
/// the watershed separator is consulted only when the two cheap estimators
/// disagree. Each call is synchronous and self-contained; the counter holds
/// no mutable state and can be shared across threads.
pub struct ObjectCounter {
    pub config: CountingConfig,
    pub verbose: bool,
}

impl ObjectCounter {
    pub fn new() -> Self {
        Self {
            config: CountingConfig::default(),
            verbose: false,
        }
    }

    pub fn with_config(mut self, config: CountingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the full counting pipeline on an image.
    pub fn count(&self, img: &DynamicImage) -> Result<ProcessingResult, CountError> {
        if img.width() == 0 || img.height() == 0 {
            return Err(CountError::ProcessingFailed(
                "input image has zero width or height".into(),
            ));
        }

        if self.verbose {
            println!("Preprocessing image...");
        }
        let mask = preprocessing::binarize(
            img,
            self.config.threshold_window,
            self.config.threshold_constant,
            self.config.closing_radius,
        );

        if self.verbose {
            println!("Counting contours and connected components...");
        }
        let regions = contours::outer_regions(&mask);
        let contour_count = regions.len() as u32;
        let component_count = contours::component_count(&mask);

        if self.verbose {
            println!(
                "Contours: {}, connected components: {}",
                contour_count, component_count
            );
            println!("Searching for circles...");
        }
        let circle_count = circles::detect_circles(img, &self.config.circles).len() as u32;

        if self.verbose {
            println!("Circles: {}", circle_count);
        }

        // The separator is expensive and failure-prone, so it only runs when
        // the cheap estimators disagree by at least the tolerance.
        let disagreement = contour_count.abs_diff(component_count);
        let watershed_count = (disagreement >= self.config.count_tolerance).then(|| {
            if self.verbose {
                println!(
                    "Estimators disagree by {}, running watershed separation...",
                    disagreement
                );
            }
            watershed::separate(img, &mask)
        });

        let estimates = CountEstimates {
            contours: contour_count,
            components: component_count,
            circles: circle_count,
            watershed: watershed_count,
        };
        let (count, method) = select(&estimates, self.config.count_tolerance);

        if self.verbose {
            println!("Final count: {} ({})", count, method);
        }

        Ok(ProcessingResult {
            count,
            method,
            estimates,
            annotated: annotate::draw_regions(img, &regions),
            regions,
        })
    }
}

impl Default for ObjectCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// The decision policy, first matching rule wins:
///
/// 1. Any detected circles are trusted unconditionally: circular containers
///    are the dominant object class and the Hough search counts them more
///    reliably than generic blob analysis.
/// 2. When the contour and component counts differ by less than the
///    tolerance, the larger of the two wins, since under-segmentation is the
///    more common failure of either estimator alone.
/// 3. Otherwise the watershed separation count wins.
pub(crate) fn select(estimates: &CountEstimates, tolerance: u32) -> (u32, CountMethod) {
    if estimates.circles > 0 {
        (estimates.circles, CountMethod::HoughCircles)
    } else if estimates.contours.abs_diff(estimates.components) < tolerance {
        (
            estimates.contours.max(estimates.components),
            CountMethod::ContourCca,
        )
    } else {
        // A disagreement of at least the tolerance always ran the separator,
        // so the estimate is present here.
        (estimates.watershed.unwrap_or(0), CountMethod::Watershed)
    }
}
