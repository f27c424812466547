//! Time-driven transitions and the resize debouncer.
//!
//! Nothing in here reads a clock. Callers pass the current time in
//! milliseconds, so a test can step virtual time and assert interpolated
//! values exactly.

use core::hash::Hash;

use hashbrown::HashMap;

use crate::transform::ZoomTransform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Symmetric cubic ease, the d3 transition default.
    #[default]
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}

pub trait Lerp: Copy {
    fn lerp(a: Self, b: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for ZoomTransform {
    fn lerp(a: Self, b: Self, t: f64) -> Self {
        ZoomTransform {
            k: f64::lerp(a.k, b.k, t),
            x: f64::lerp(a.x, b.x, t),
            y: f64::lerp(a.y, b.y, t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<T> {
    pub from: T,
    pub to: T,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl<T: Lerp> Transition<T> {
    pub fn new(from: T, to: T, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing: Easing::default(),
        }
    }

    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now_ms: f64) -> T {
        let p = self.progress(now_ms);
        if p >= 1.0 {
            return self.to;
        }
        T::lerp(self.from, self.to, self.easing.apply(p))
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// A set of running transitions, at most one per key. Scheduling a key that is
/// already running replaces it.
#[derive(Debug, Clone)]
pub struct Timeline<K, T> {
    running: HashMap<K, Transition<T>>,
}

impl<K, T> Default for Timeline<K, T> {
    fn default() -> Self {
        Self {
            running: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Copy, T: Lerp> Timeline<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, key: K, transition: Transition<T>) {
        self.running.insert(key, transition);
    }

    pub fn cancel(&mut self, key: &K) -> Option<Transition<T>> {
        self.running.remove(key)
    }

    pub fn clear(&mut self) {
        self.running.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    pub fn is_running(&self, key: &K) -> bool {
        self.running.contains_key(key)
    }

    pub fn value(&self, key: &K, now_ms: f64) -> Option<T> {
        self.running.get(key).map(|t| t.value_at(now_ms))
    }

    /// Current value of every running transition; finished ones are removed
    /// after reporting their final value.
    pub fn advance(&mut self, now_ms: f64) -> Vec<(K, T)> {
        let out: Vec<(K, T)> = self
            .running
            .iter()
            .map(|(k, t)| (*k, t.value_at(now_ms)))
            .collect();
        self.running.retain(|_, t| !t.is_done(now_ms));
        out
    }
}

/// Last-writer-wins delay: each `trigger` pushes the deadline out and
/// replaces the payload; `poll` yields the payload once the quiet period has
/// elapsed.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_ms: f64,
    pending: Option<(f64, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms,
            pending: None,
        }
    }

    pub fn trigger(&mut self, now_ms: f64, value: T) {
        self.pending = Some((now_ms + self.quiet_ms, value));
    }

    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        let ready = matches!(&self.pending, Some((deadline, _)) if now_ms >= *deadline);
        if ready {
            self.pending.take().map(|(_, v)| v)
        } else {
            None
        }
    }

    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|(d, _)| *d)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
