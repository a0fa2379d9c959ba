//! Wrong-PIN rejection animation.

/// Horizontal offsets (in cells) played once per rejection.
const SHAKE_OFFSETS: [i16; 5] = [3, -3, 2, -2, 0];

/// Plays the offsets one per tick, then stops.
///
/// Started only when the lock controller hands over a pending shake, so a
/// redraw never replays it.
#[derive(Debug, Default)]
pub struct ShakeAnimation {
    frame: Option<usize>,
}

impl ShakeAnimation {
    pub fn start(&mut self) {
        self.frame = Some(0);
    }

    pub fn stop(&mut self) {
        self.frame = None;
    }

    pub fn tick(&mut self) {
        self.frame = match self.frame {
            Some(frame) if frame + 1 < SHAKE_OFFSETS.len() => Some(frame + 1),
            _ => None,
        };
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    pub fn offset(&self) -> i16 {
        self.frame.map(|f| SHAKE_OFFSETS[f]).unwrap_or(0)
    }
}
