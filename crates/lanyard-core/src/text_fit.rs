//! Width-driven text truncation and name auto-scaling.

use crate::canvas::Canvas;

/// Largest scale the auto-scaler starts from (2.0 in hundredths).
pub const MAX_NAME_SCALE: u16 = 200;
/// Smallest scale the auto-scaler accepts (0.1 in hundredths).
pub const MIN_NAME_SCALE: u16 = 10;

/// Returns the longest prefix of `text` whose measured width does not
/// exceed `max_width`. The empty string is a valid terminal result.
pub fn fit_to_width<'a, C>(canvas: &C, text: &'a str, scale: u16, max_width: u32) -> &'a str
where
    C: Canvas,
{
    let mut fitted = text;
    while !fitted.is_empty() && canvas.measure_text(fitted, scale) > max_width {
        let cut = fitted
            .char_indices()
            .next_back()
            .map(|(index, _)| index)
            .unwrap_or(0);
        fitted = &fitted[..cut];
    }
    fitted
}

/// Finds the largest scale at which `text` renders strictly narrower
/// than `max_width`, searching downward one hundredth at a time.
///
/// The result is clamped to `MIN_NAME_SCALE..=MAX_NAME_SCALE`; at the
/// floor the text may still overflow and is drawn anyway.
pub fn autoscale<C>(canvas: &C, text: &str, max_width: u32) -> u16
where
    C: Canvas,
{
    let mut scale = MAX_NAME_SCALE;
    while scale > MIN_NAME_SCALE && canvas.measure_text(text, scale) >= max_width {
        scale -= 1;
    }
    scale
}

/// Vertical advance to the next stacked name line for a token drawn at
/// `scale`: a tenth of the scale, rounded up, plus fixed leading.
pub fn name_line_advance(scale: u16) -> i32 {
    scale.div_ceil(10) as i32 + 15
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;

    #[test]
    fn fitted_text_never_exceeds_the_budget() {
        let canvas = RecordingCanvas::new();

        for budget in [0u32, 1, 7, 30, 1_000] {
            let fitted = fit_to_width(&canvas, "Developer Advocate", 60, budget);
            assert!(canvas.measure_text(fitted, 60) <= budget);
        }
    }

    #[test]
    fn fitting_is_idempotent_on_fitting_text() {
        let canvas = RecordingCanvas::new();
        let text = "Auth0 by Okta";
        let width = canvas.measure_text(text, 60);

        assert_eq!(fit_to_width(&canvas, text, 60, width), text);
        assert_eq!(
            fit_to_width(&canvas, fit_to_width(&canvas, text, 60, 40), 60, 40),
            fit_to_width(&canvas, text, 60, 40)
        );
    }

    #[test]
    fn nothing_fits_in_a_zero_budget() {
        let canvas = RecordingCanvas::new();
        assert_eq!(fit_to_width(&canvas, "abc", 100, 0), "");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let canvas = RecordingCanvas::new();
        let fitted = fit_to_width(&canvas, "ééééé", 100, 12);
        assert!(fitted.chars().all(|c| c == 'é'));
        assert_eq!(fitted, "éé");
    }

    #[test]
    fn autoscale_stays_within_bounds() {
        let canvas = RecordingCanvas::new();

        assert_eq!(autoscale(&canvas, "Jo", 1_000), MAX_NAME_SCALE);
        assert_eq!(
            autoscale(&canvas, "an implausibly long badge name", 1),
            MIN_NAME_SCALE
        );
    }

    #[test]
    fn autoscaled_text_renders_below_the_budget() {
        let canvas = RecordingCanvas::new();
        let budget = 147;
        let scale = autoscale(&canvas, "Fernandez-Smithington", budget);

        assert!(canvas.measure_text("Fernandez-Smithington", scale) < budget);
        assert!(canvas.measure_text("Fernandez-Smithington", scale + 1) >= budget);
    }

    #[test]
    fn longer_tokens_scale_no_larger_than_shorter_ones() {
        let canvas = RecordingCanvas::new();
        let budget = 147;

        let short = autoscale(&canvas, "Peter", budget);
        let long = autoscale(&canvas, "Peter-Fernandez", budget);
        assert!(long <= short);
    }

    #[test]
    fn line_advance_matches_the_ceiling_rule() {
        // ceil(10 * 2.0) + 15 and ceil(10 * 0.57) + 15.
        assert_eq!(name_line_advance(200), 35);
        assert_eq!(name_line_advance(57), 21);
        assert_eq!(name_line_advance(10), 16);
    }
}
