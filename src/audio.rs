//! Audio level analysis
//!
//! Stateless transform from a buffer of byte-range time-domain samples
//! (128 is silence) to a 0-100 volume score. The `140` gain is empirical:
//! it puts typical speaking volume mid-scale and claims no calibrated
//! loudness unit.

/// Empirical gain mapping RMS to the 0-100 scale
const VOLUME_GAIN: f64 = 140.0;

/// Level meter for raw time-domain audio buffers
pub struct LevelMeter;

impl LevelMeter {
    /// Volume (0-100) of one sample buffer. An empty buffer is silence.
    pub fn volume(samples: &[u8]) -> u8 {
        let rms = Self::rms(samples);
        (rms * VOLUME_GAIN).round().clamp(0.0, 100.0) as u8
    }

    /// Root-mean-square of the buffer after removing the 128 mid-point bias.
    pub fn rms(samples: &[u8]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = samples
            .iter()
            .map(|&s| {
                let v = (s as f64 - 128.0) / 128.0;
                v * v
            })
            .sum();
        (sum / samples.len() as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_is_zero() {
        assert_eq!(LevelMeter::volume(&[128; 1024]), 0);
        assert_eq!(LevelMeter::volume(&[]), 0);
    }

    #[test]
    fn test_full_scale_clamps_to_100() {
        // Alternating rail-to-rail samples give RMS near 1.0.
        let loud: Vec<u8> = (0..1024).map(|i| if i % 2 == 0 { 0 } else { 255 }).collect();
        assert_eq!(LevelMeter::volume(&loud), 100);
        assert_eq!(LevelMeter::volume(&[0; 512]), 100);
        assert_eq!(LevelMeter::volume(&[255; 512]), 100);
    }

    #[test]
    fn test_moderate_signal_lands_mid_scale() {
        // Constant offset of 64 from bias: |v| = 0.5, RMS = 0.5, 0.5*140 = 70.
        assert_eq!(LevelMeter::volume(&[192; 256]), 70);
        assert_eq!(LevelMeter::volume(&[64; 256]), 70);
    }

    #[test]
    fn test_volume_always_in_range() {
        for pattern in [vec![128u8; 3], vec![0, 255, 128], vec![200; 77]] {
            let v = LevelMeter::volume(&pattern);
            assert!(v <= 100);
        }
    }
}
