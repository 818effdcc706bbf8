//! Sequential animation timeline.
//!
//! A [`Timeline`] is a queue of steps (tweens, one-shot calls, waits)
//! advanced by [`Timeline::tick`] with a monotonic timestamp in
//! milliseconds. Steps are anchored to their logical end times, so a late
//! frame never accumulates drift across step boundaries. The struct knows
//! nothing about the DOM or the frame scheduler, which keeps it testable
//! off-browser; the player in this module's parent drives it from
//! `requestAnimationFrame` and the apply closures poke element styles.

use std::collections::VecDeque;

use super::ease::Ease;

enum Step {
    Tween {
        duration_ms: f64,
        ease: Ease,
        apply: Box<dyn FnMut(f64)>,
    },
    Call(Option<Box<dyn FnOnce()>>),
    Wait(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Running,
    Done,
}

#[derive(Default)]
pub struct Timeline {
    steps: VecDeque<Step>,
    /// Start time of the step at the front of the queue. Set on the first
    /// tick and re-anchored to each step's logical end as it completes.
    anchor: Option<f64>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tween. `apply` receives the eased progress in `0.0..=1.0`.
    pub fn tween(mut self, duration_ms: f64, ease: Ease, apply: impl FnMut(f64) + 'static) -> Self {
        self.steps.push_back(Step::Tween {
            duration_ms,
            ease,
            apply: Box::new(apply),
        });
        self
    }

    /// Append a one-shot callback, run when the preceding step completes.
    pub fn call(mut self, f: impl FnOnce() + 'static) -> Self {
        self.steps.push_back(Step::Call(Some(Box::new(f))));
        self
    }

    /// Append a pause.
    pub fn wait(mut self, duration_ms: f64) -> Self {
        self.steps.push_back(Step::Wait(duration_ms));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Advance to `now_ms`. Completed steps are drained in order within a
    /// single tick, so a long frame still runs every callback it passed.
    pub fn tick(&mut self, now_ms: f64) -> Playback {
        loop {
            if self.steps.is_empty() {
                return Playback::Done;
            }
            let anchor = *self.anchor.get_or_insert(now_ms);
            let step = match self.steps.front_mut() {
                Some(step) => step,
                None => return Playback::Done,
            };
            match step {
                Step::Call(f) => {
                    if let Some(f) = f.take() {
                        f();
                    }
                    self.steps.pop_front();
                }
                Step::Wait(duration_ms) => {
                    let end = anchor + *duration_ms;
                    if now_ms < end {
                        return Playback::Running;
                    }
                    self.steps.pop_front();
                    self.anchor = Some(end);
                }
                Step::Tween {
                    duration_ms,
                    ease,
                    apply,
                } => {
                    if *duration_ms <= 0.0 {
                        apply(ease.apply(1.0));
                        self.steps.pop_front();
                        continue;
                    }
                    let progress = (now_ms - anchor) / *duration_ms;
                    if progress < 1.0 {
                        apply(ease.apply(progress.max(0.0)));
                        return Playback::Running;
                    }
                    apply(ease.apply(1.0));
                    let end = anchor + *duration_ms;
                    self.steps.pop_front();
                    self.anchor = Some(end);
                }
            }
        }
    }
}

/// Per-element start offsets for a block of elements animated by a single
/// tween. The tween runs with a linear ease over [`Stagger::total_ms`];
/// each element maps the block's elapsed time into its own `0..=1` window
/// via [`Stagger::local`] and eases that.
#[derive(Debug, Clone)]
pub struct Stagger {
    starts: Vec<f64>,
    item_ms: f64,
}

impl Stagger {
    /// Start times spread evenly across `spread_ms`, first element at zero.
    pub fn evenly(count: usize, spread_ms: f64, item_ms: f64) -> Self {
        let step = if count > 1 {
            spread_ms / (count - 1) as f64
        } else {
            0.0
        };
        Self {
            starts: (0..count).map(|i| i as f64 * step).collect(),
            item_ms,
        }
    }

    /// Start times proportional to distance from the center element.
    pub fn from_center(count: usize, each_ms: f64, item_ms: f64) -> Self {
        let center = (count.saturating_sub(1)) as f64 / 2.0;
        Self {
            starts: (0..count)
                .map(|i| (i as f64 - center).abs() * each_ms)
                .collect(),
            item_ms,
        }
    }

    /// Shuffle the start offsets with a deterministic xorshift permutation.
    pub fn shuffled(mut self, seed: u64) -> Self {
        let mut state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        for i in (1..self.starts.len()).rev() {
            let j = (next() % (i as u64 + 1)) as usize;
            self.starts.swap(i, j);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn total_ms(&self) -> f64 {
        self.starts
            .iter()
            .fold(0.0_f64, |acc, s| acc.max(*s))
            + self.item_ms
    }

    /// Linear progress of element `index` at `elapsed_ms` into the block.
    pub fn local(&self, index: usize, elapsed_ms: f64) -> f64 {
        let start = self.starts.get(index).copied().unwrap_or(0.0);
        if self.item_ms <= 0.0 {
            return if elapsed_ms >= start { 1.0 } else { 0.0 };
        }
        ((elapsed_ms - start) / self.item_ms).clamp(0.0, 1.0)
    }
}
