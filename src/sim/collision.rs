//! Collision tests and responses
//!
//! Everything here is axis-aligned. Responses clamp the ball back to the
//! contact edge and flip one velocity component; no time-of-impact is
//! computed and speed magnitude never changes.

use glam::Vec2;

use super::state::{Ball, Brick, BrickGrid, Paddle};

/// Reflect off the left and right walls.
///
/// The two checks are independent, not `else`-chained: a ball wider than the
/// surface would trip both and flip `vel.x` twice. [`crate::Tuning::validate`]
/// rejects such a radius.
pub fn reflect_side_walls(ball: &mut Ball, surface_width: f32) -> bool {
    let mut hit = false;
    if ball.pos.x - ball.radius <= 0.0 {
        ball.pos.x = ball.radius;
        ball.vel.x = -ball.vel.x;
        hit = true;
    }
    if ball.pos.x + ball.radius >= surface_width {
        ball.pos.x = surface_width - ball.radius;
        ball.vel.x = -ball.vel.x;
        hit = true;
    }
    hit
}

/// Reflect off the top edge. There is no floor.
pub fn reflect_ceiling(ball: &mut Ball) -> bool {
    if ball.pos.y - ball.radius <= 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y;
        return true;
    }
    false
}

/// Ball's bottom edge inside the paddle's vertical band, center inside its
/// horizontal span, and moving down. A ball clipping the paddle corner with
/// its center outside the span is a miss.
pub fn hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let ball_bottom = ball.pos.y + ball.radius;
    ball_bottom >= paddle.top()
        && ball_bottom <= paddle.top() + paddle.height
        && ball.pos.x >= paddle.left()
        && ball.pos.x <= paddle.right()
        && ball.vel.y > 0.0
}

/// Sit the ball on top of the paddle and send it back up.
/// Horizontal velocity is kept as is.
pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle) {
    ball.pos.y = paddle.top() - ball.radius;
    ball.vel.y = -ball.vel.y;
}

/// Ball bounding box strictly overlaps the brick rectangle
pub fn overlaps_brick(ball: &Ball, brick: &Brick, size: Vec2) -> bool {
    ball.pos.x + ball.radius > brick.pos.x
        && ball.pos.x - ball.radius < brick.pos.x + size.x
        && ball.pos.y + ball.radius > brick.pos.y
        && ball.pos.y - ball.radius < brick.pos.y + size.y
}

/// Row-major index of the first live brick the ball overlaps
pub fn first_brick_hit(ball: &Ball, grid: &BrickGrid) -> Option<usize> {
    grid.iter()
        .position(|brick| brick.alive && overlaps_brick(ball, brick, grid.size))
}

/// Ball entirely below the bottom edge
pub fn fell_out(ball: &Ball, surface_height: f32) -> bool {
    ball.pos.y - ball.radius > surface_height
}
