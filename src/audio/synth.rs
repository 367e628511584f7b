use std::f32::consts::TAU;

use fundsp::prelude::*;

pub const SAMPLE_RATE: u32 = 44_100;

/// A procedural stand-in for `cue`, or `None` when the cue has no voice.
pub fn render(cue: super::Cue) -> Option<Vec<f32>> {
    use super::Cue;

    let (mut node, seconds) = match cue {
        // Falling sawtooth, 400 Hz down to 80 Hz over 0.4 s.
        Cue::Crash => voice(
            (lfo(|t: f32| lerp(400.0, 80.0, (t / 0.4).min(1.0))) >> saw())
                * lfo(|t: f32| lerp(0.15, 0.0, (t / 0.5).min(1.0))),
            0.5,
        ),
        Cue::Pickup => voice(
            (lfo(|t: f32| lerp(600.0, 1400.0, (t / 0.15).min(1.0))) >> sine::<f32>())
                * lfo(|t: f32| lerp(0.2, 0.0, (t / 0.2).min(1.0))),
            0.2,
        ),
        Cue::Click => voice(
            square_hz(1200.0) * lfo(|t: f32| if t < 0.03 { 0.08 } else { 0.0 }),
            0.04,
        ),
        Cue::Hover => voice(
            sine_hz::<f32>(880.0) * lfo(|t: f32| lerp(0.06, 0.0, (t / 0.03).min(1.0))),
            0.03,
        ),
        // Whole cycles of the 4 Hz wobble so the loop seam is quiet.
        Cue::Engine => voice(
            (lfo(|t: f32| 55.0 + 6.0 * (t * TAU * 4.0).sin()) >> saw()) * 0.08,
            1.0,
        ),
        Cue::MenuMusic => return None,
    };

    node.set_sample_rate(SAMPLE_RATE as f64);
    let len = (seconds * SAMPLE_RATE as f32) as usize;
    Some((0..len).map(|_| node.get_mono()).collect())
}

fn voice(node: impl AudioUnit + 'static, seconds: f32) -> (Box<dyn AudioUnit>, f32) {
    (Box::new(node), seconds)
}
