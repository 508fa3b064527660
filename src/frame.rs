//! Frame motion and posture analysis
//!
//! [`FrameAnalyzer`] consumes successive video frames in capture order and
//! derives the body metrics: inter-frame motion smoothed by an exponential
//! moving average, head stability and gesture activity from that motion,
//! posture from the luma of a fixed central region, and a combined
//! engagement score.
//!
//! The analyzer is purely reactive: it holds no timer and no scheduling
//! concern. The host invokes [`FrameAnalyzer::on_frame`] once per rendered
//! frame. Motion is a difference against the immediately preceding frame, so
//! frames must be fed in capture order.

use crate::types::BodyMetrics;

/// Fixed downsample target width in pixels.
///
/// Keeps per-tick cost bounded and independent of camera resolution.
pub const DOWNSAMPLE_WIDTH: usize = 160;

/// Fraction of the previous EMA retained each tick
const MOTION_EMA_RETAIN: f64 = 0.9;

/// Central region bounds used for the posture luma average
const CENTER_X_RANGE: (f64, f64) = (0.4, 0.6);
const CENTER_Y_RANGE: (f64, f64) = (0.3, 0.7);

/// One RGBA8 video frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl VideoFrame {
    /// Wrap an RGBA8 pixel buffer. `data.len()` must equal
    /// `width * height * 4`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != width * height * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a frame where every pixel has the same RGB value.
    pub fn solid(width: usize, height: usize, value: u8) -> Self {
        let mut data = vec![value; width * height * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Nearest-neighbor downsample to `target_width`, proportional height.
    fn downsample(&self, target_width: usize) -> VideoFrame {
        let target_height =
            (((self.height as f64 / self.width as f64) * target_width as f64).round() as usize)
                .max(1);
        if self.width == target_width && self.height == target_height {
            return self.clone();
        }

        let mut data = Vec::with_capacity(target_width * target_height * 4);
        for y in 0..target_height {
            let src_y = y * self.height / target_height;
            for x in 0..target_width {
                let src_x = x * self.width / target_width;
                let idx = (src_y * self.width + src_x) * 4;
                data.extend_from_slice(&self.data[idx..idx + 4]);
            }
        }
        VideoFrame {
            width: target_width,
            height: target_height,
            data,
        }
    }
}

/// Stateful analyzer deriving body metrics from a video frame stream
#[derive(Debug, Clone, Default)]
pub struct FrameAnalyzer {
    previous: Option<VideoFrame>,
    motion_ema: f64,
    metrics: BodyMetrics,
}

impl FrameAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the next frame in capture order.
    ///
    /// The first frame only seeds the previous-frame buffer; metrics keep
    /// their defaults until a frame pair exists.
    pub fn on_frame(&mut self, frame: &VideoFrame) {
        let current = frame.downsample(DOWNSAMPLE_WIDTH);

        if let Some(previous) = &self.previous {
            // A resolution change mid-stream would misalign the diff; only
            // compare frames of identical downsampled geometry.
            if previous.width == current.width && previous.height == current.height {
                let instant_motion = mean_gray_diff(previous, &current);
                self.motion_ema = self.motion_ema * MOTION_EMA_RETAIN
                    + instant_motion * (1.0 - MOTION_EMA_RETAIN);

                let head = (100.0 - self.motion_ema / 2.0).clamp(0.0, 100.0);
                let gesture = (self.motion_ema / 2.0).clamp(0.0, 100.0);
                let center_avg = center_luma(&current);
                let posture = (50.0 + (center_avg - 128.0) / 2.0).clamp(0.0, 100.0);

                self.metrics = BodyMetrics {
                    posture: posture.round() as u8,
                    head_stability: head.round() as u8,
                    gesture_activity: gesture.round() as u8,
                    engagement: ((100.0 - head + gesture) / 2.0).round().clamp(0.0, 100.0) as u8,
                };
            }
        }

        self.previous = Some(current);
    }

    /// Latest derived body metrics.
    pub fn metrics(&self) -> BodyMetrics {
        self.metrics.clone()
    }

    /// Current smoothed motion value.
    pub fn motion_ema(&self) -> f64 {
        self.motion_ema
    }

    /// Drop the previous frame and smoothing state.
    pub fn reset(&mut self) {
        self.previous = None;
        self.motion_ema = 0.0;
        self.metrics = BodyMetrics::default();
    }
}

/// Per-pixel grayscale as the mean of the color channels
fn gray(data: &[u8], idx: usize) -> f64 {
    (data[idx] as f64 + data[idx + 1] as f64 + data[idx + 2] as f64) / 3.0
}

/// Mean absolute grayscale difference between two equally sized frames
fn mean_gray_diff(a: &VideoFrame, b: &VideoFrame) -> f64 {
    let mut diff = 0.0;
    let mut i = 0;
    while i < a.data.len() {
        diff += (gray(&a.data, i) - gray(&b.data, i)).abs();
        i += 4;
    }
    diff / (a.width * a.height) as f64
}

/// Mean luma over the fixed central region, sampled every 2 pixels each axis
fn center_luma(frame: &VideoFrame) -> f64 {
    let w = frame.width;
    let h = frame.height;
    let mut sum = 0.0;
    let mut count = 0u32;

    let mut y = h as f64 * CENTER_Y_RANGE.0;
    while y < h as f64 * CENTER_Y_RANGE.1 {
        let mut x = w as f64 * CENTER_X_RANGE.0;
        while x < w as f64 * CENTER_X_RANGE.1 {
            let idx = ((y as usize) * w + x as usize) * 4;
            sum += gray(&frame.data, idx);
            count += 1;
            x += 2.0;
        }
        y += 2.0;
    }

    sum / count.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_emits_nothing() {
        let mut analyzer = FrameAnalyzer::new();
        analyzer.on_frame(&VideoFrame::solid(320, 180, 200));

        assert_eq!(analyzer.metrics(), BodyMetrics::default());
        assert_eq!(analyzer.motion_ema(), 0.0);
    }

    #[test]
    fn test_identical_frames_keep_ema_at_zero() {
        let mut analyzer = FrameAnalyzer::new();
        let frame = VideoFrame::solid(320, 180, 128);
        analyzer.on_frame(&frame);
        analyzer.on_frame(&frame);

        assert_eq!(analyzer.motion_ema(), 0.0);
        let metrics = analyzer.metrics();
        assert_eq!(metrics.head_stability, 100);
        assert_eq!(metrics.gesture_activity, 0);
    }

    #[test]
    fn test_ema_decays_strictly_toward_zero_on_still_frames() {
        let mut analyzer = FrameAnalyzer::new();
        analyzer.on_frame(&VideoFrame::solid(320, 180, 0));
        analyzer.on_frame(&VideoFrame::solid(320, 180, 255));
        let after_motion = analyzer.motion_ema();
        assert!(after_motion > 0.0);

        // Feeding identical frames must move the EMA strictly between its
        // previous value and zero on every tick.
        let mut previous = after_motion;
        for _ in 0..5 {
            analyzer.on_frame(&VideoFrame::solid(320, 180, 255));
            let current = analyzer.motion_ema();
            assert!(current > 0.0);
            assert!(current < previous);
            previous = current;
        }
    }

    #[test]
    fn test_all_outputs_clamped_on_degenerate_frames() {
        for value in [0u8, 255u8] {
            let mut analyzer = FrameAnalyzer::new();
            analyzer.on_frame(&VideoFrame::solid(640, 360, value));
            analyzer.on_frame(&VideoFrame::solid(640, 360, value));
            let m = analyzer.metrics();
            assert!(m.posture <= 100);
            assert!(m.head_stability <= 100);
            assert!(m.gesture_activity <= 100);
            assert!(m.engagement <= 100);
        }
    }

    #[test]
    fn test_posture_follows_center_luma() {
        let mut analyzer = FrameAnalyzer::new();
        // Dark center reads as slumped, bright center as upright.
        analyzer.on_frame(&VideoFrame::solid(320, 180, 0));
        analyzer.on_frame(&VideoFrame::solid(320, 180, 0));
        assert_eq!(analyzer.metrics().posture, 0);

        let mut analyzer = FrameAnalyzer::new();
        analyzer.on_frame(&VideoFrame::solid(320, 180, 255));
        analyzer.on_frame(&VideoFrame::solid(320, 180, 255));
        assert_eq!(analyzer.metrics().posture, 100);

        let mut analyzer = FrameAnalyzer::new();
        analyzer.on_frame(&VideoFrame::solid(320, 180, 128));
        analyzer.on_frame(&VideoFrame::solid(320, 180, 128));
        assert_eq!(analyzer.metrics().posture, 50);
    }

    #[test]
    fn test_downsample_preserves_aspect_ratio() {
        let frame = VideoFrame::solid(640, 360, 10);
        let small = frame.downsample(DOWNSAMPLE_WIDTH);
        assert_eq!(small.width(), 160);
        assert_eq!(small.height(), 90);
        assert_eq!(small.data().len(), 160 * 90 * 4);
    }

    #[test]
    fn test_frame_rejects_mismatched_buffer() {
        assert!(VideoFrame::new(4, 4, vec![0; 4 * 4 * 4]).is_some());
        assert!(VideoFrame::new(4, 4, vec![0; 3]).is_none());
        assert!(VideoFrame::new(0, 4, vec![]).is_none());
    }

    #[test]
    fn test_reset_clears_state() {
        let mut analyzer = FrameAnalyzer::new();
        analyzer.on_frame(&VideoFrame::solid(320, 180, 0));
        analyzer.on_frame(&VideoFrame::solid(320, 180, 255));
        assert!(analyzer.motion_ema() > 0.0);

        analyzer.reset();
        assert_eq!(analyzer.motion_ema(), 0.0);
        assert_eq!(analyzer.metrics(), BodyMetrics::default());
    }
}
