//! Fan layout: where a card sits given its place in the visible window.
//!
//! The fan is a horizontal row with a sine-shaped lift (zero at both edges,
//! highest in the middle) and a linear tilt that is zero in the middle and
//! `±max_rotation` at the edges. `pose` is pure; all inputs are explicit.

use crate::config::FanConfig;
use std::f32::consts::PI;

/// Visual transform for one card. `x` is the card's horizontal center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub x: f32,
    pub rotation_degrees: f32,
    pub vertical_lift: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanLayout {
    pub max_arc_height: f32,
    pub max_rotation: f32,
    pub fan_width_fraction: f32,
}

impl Default for FanLayout {
    fn default() -> Self {
        Self::from(&FanConfig::default())
    }
}

impl From<&FanConfig> for FanLayout {
    fn from(cfg: &FanConfig) -> Self {
        Self {
            max_arc_height: cfg.max_arc_height,
            max_rotation: cfg.max_rotation,
            fan_width_fraction: cfg.fan_width_fraction,
        }
    }
}

impl FanLayout {
    pub fn fan_width(&self, viewport_width: f32) -> f32 {
        viewport_width.max(0.0) * self.fan_width_fraction
    }

    pub fn start_x(&self, viewport_width: f32) -> f32 {
        (viewport_width.max(0.0) - self.fan_width(viewport_width)) / 2.0
    }

    /// Horizontal distance between neighbouring cards. Zero when fewer than
    /// two cards are visible.
    pub fn spacing(&self, visible_count: usize, viewport_width: f32) -> f32 {
        if visible_count < 2 {
            return 0.0;
        }
        self.fan_width(viewport_width) / (visible_count - 1) as f32
    }

    /// Position of `relative_index` within the fan, in `[0, 1]`.
    pub fn normalized(relative_index: f32, visible_count: usize) -> f32 {
        if visible_count < 2 {
            return 0.5;
        }
        (relative_index / (visible_count - 1) as f32).clamp(0.0, 1.0)
    }

    /// Pose for a card `relative_index` places from the window start.
    /// Fractional indices come from mid-drag offsets.
    ///
    /// ```
    /// use tarot_fan::layout::FanLayout;
    ///
    /// let fan = FanLayout::default();
    /// let mid = fan.pose(6.0, 13, 400.0);
    /// assert_eq!(mid.rotation_degrees, 0.0);
    /// assert!((mid.x - 200.0).abs() < 1e-3);
    /// ```
    pub fn pose(&self, relative_index: f32, visible_count: usize, viewport_width: f32) -> Pose {
        if visible_count < 2 {
            return Pose { x: viewport_width.max(0.0) / 2.0, rotation_degrees: 0.0, vertical_lift: 0.0 };
        }
        let x = self.start_x(viewport_width)
            + relative_index * self.spacing(visible_count, viewport_width);
        let n = Self::normalized(relative_index, visible_count);
        // sin(PI) is a hair below zero in f32
        let vertical_lift = (self.max_arc_height * (PI * n).sin()).max(0.0);
        let rotation_degrees = self.max_rotation * (n - 0.5) * 2.0;
        Pose { x, rotation_degrees, vertical_lift }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn edges_are_flat_and_tilted() {
        let fan = FanLayout::default();
        let left = fan.pose(0.0, 13, 1000.0);
        let right = fan.pose(12.0, 13, 1000.0);
        assert!(left.vertical_lift.abs() < EPS);
        assert!(right.vertical_lift.abs() < EPS);
        assert!((left.rotation_degrees + 30.0).abs() < EPS);
        assert!((right.rotation_degrees - 30.0).abs() < EPS);
        assert!((left.x - 50.0).abs() < EPS);
        assert!((right.x - 950.0).abs() < EPS);
    }

    #[test]
    fn center_is_highest_and_upright() {
        let fan = FanLayout::default();
        let c = fan.pose(6.0, 13, 1000.0);
        assert!((c.vertical_lift - 150.0).abs() < EPS);
        assert!(c.rotation_degrees.abs() < EPS);
    }

    #[test]
    fn single_card_is_centered() {
        let fan = FanLayout::default();
        let p = fan.pose(0.0, 1, 800.0);
        assert_eq!(p, Pose { x: 400.0, rotation_degrees: 0.0, vertical_lift: 0.0 });
        assert_eq!(fan.spacing(1, 800.0), 0.0);
    }

    #[test]
    fn zero_width_viewport_is_neutral() {
        let fan = FanLayout::default();
        let p = fan.pose(3.0, 7, 0.0);
        assert_eq!(p.x, 0.0);
        assert!(p.vertical_lift.is_finite());
    }

    #[test]
    fn out_of_window_indices_clamp_lift_and_tilt() {
        let fan = FanLayout::default();
        let before = fan.pose(-0.5, 13, 1000.0);
        let after = fan.pose(12.7, 13, 1000.0);
        assert_eq!(before.vertical_lift, 0.0);
        assert!((before.rotation_degrees + 30.0).abs() < EPS);
        assert!((after.rotation_degrees - 30.0).abs() < EPS);
        assert!(before.x < fan.start_x(1000.0));
    }
}
