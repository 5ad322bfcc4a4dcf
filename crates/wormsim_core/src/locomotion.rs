//! Turns the two motor accumulators into heading and speed, and moves the head
//! anchor across a toroidal canvas.

use crate::config::LocomotionConfig;
use crate::food::{FoodContact, FoodField};
use std::f64::consts::{PI, TAU};
use wormsim_data::Point;

/// Wraps an angle into (−π, π].
#[must_use]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Wraps a coordinate into [0, extent).
#[must_use]
pub fn wrap_coordinate(value: f64, extent: f64) -> f64 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionState {
    /// Head anchor, always inside the canvas.
    pub target: Point,
    pub facing_direction: f64,
    pub target_direction: f64,
    pub speed: f64,
    pub target_speed: f64,
    pub speed_step: f64,
}

impl LocomotionState {
    /// At rest at `target`, facing along +x.
    #[must_use]
    pub fn at(target: Point) -> Self {
        Self {
            target,
            facing_direction: 0.0,
            target_direction: 0.0,
            speed: 0.0,
            target_speed: 0.0,
            speed_step: 0.0,
        }
    }
}

pub struct LocomotionController {
    state: LocomotionState,
    params: LocomotionConfig,
    width: f64,
    height: f64,
}

impl LocomotionController {
    /// Starts at rest in the middle of a `width` x `height` canvas.
    #[must_use]
    pub fn new(params: LocomotionConfig, width: f64, height: f64) -> Self {
        let center = Point::new((width / 2.0).floor(), (height / 2.0).floor());
        Self::with_state(LocomotionState::at(center), params, width, height)
    }

    #[must_use]
    pub fn with_state(
        state: LocomotionState,
        params: LocomotionConfig,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            state,
            params,
            width,
            height,
        }
    }

    #[must_use]
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    #[must_use]
    pub fn target(&self) -> Point {
        self.state.target
    }

    #[must_use]
    pub fn params(&self) -> &LocomotionConfig {
        &self.params
    }

    pub fn set_params(&mut self, params: LocomotionConfig) {
        self.params = params;
    }

    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// One full tick: steer from the accumulators, move, then check food.
    pub fn integrate(&mut self, left: f64, right: f64, food: &mut FoodField) -> FoodContact {
        self.steer(left, right);
        self.advance();
        self.sense_food(food)
    }

    /// Derives target heading, target speed and the easing step.
    pub fn steer(&mut self, left: f64, right: f64) {
        let scaling = self.params.scaling;
        let turn = (left - right) / scaling;
        let state = &mut self.state;

        state.target_direction = state.facing_direction + turn * PI;
        state.target_speed = (left.abs() + right.abs()) / (scaling * self.params.speed_divisor);
        state.speed_step =
            (state.target_speed - state.speed) / (scaling * self.params.easing_divisor);
    }

    /// Applies speed, then heading, then position, in that order.
    pub fn advance(&mut self) {
        self.state.speed += self.state.speed_step;

        let error = self.heading_error();
        if error > 0.0 {
            self.state.facing_direction -= self.params.turn_step;
        } else if error < 0.0 {
            self.state.facing_direction += self.params.turn_step;
        }
        self.state.facing_direction = wrap_angle(self.state.facing_direction);

        let facing = self.state.facing_direction;
        let speed = self.state.speed;
        let target = &mut self.state.target;
        target.x = wrap_coordinate(target.x + facing.cos() * speed, self.width);
        // canvas y grows downward
        target.y = wrap_coordinate(target.y - facing.sin() * speed, self.height);
    }

    /// `facing - target_direction`, shifted by one full turn when the plain
    /// difference crosses the ±π seam.
    ///
    /// Only a single ±2π shift is applied. Targets more than a turn away keep
    /// the sign that shift gives them.
    #[must_use]
    pub fn heading_error(&self) -> f64 {
        let facing = self.state.facing_direction;
        let target = self.state.target_direction;
        let diff = facing - target;
        if diff.abs() <= PI {
            diff
        } else if facing > target {
            diff - TAU
        } else {
            diff + TAU
        }
    }

    /// Looks for food around the head, measured from its rounded position.
    pub fn sense_food(&self, food: &mut FoodField) -> FoodContact {
        food.sense(
            self.state.target.rounded(),
            self.params.sensing_radius,
            self.params.consumption_radius,
        )
    }
}
