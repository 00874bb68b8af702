//! Per-frame simulation tick
//!
//! Advances the game state by one variable-length frame. Order per tick:
//! paddle, ball integration, side walls, ceiling, paddle, bricks, fall-out.

use serde::{Deserialize, Serialize};

use super::collision::{
    bounce_off_paddle, fell_out, first_brick_hit, hits_paddle, reflect_ceiling,
    reflect_side_walls,
};
use super::state::{GamePhase, GameState, InputState, PhaseCommand};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Movement keys held right now
    pub input: InputState,
    /// Phase change to apply before simulating
    pub command: Option<PhaseCommand>,
    /// Start a fresh game before anything else. Ignored once stopped.
    pub restart: bool,
}

impl TickInput {
    pub fn held(left: bool, right: bool) -> Self {
        Self {
            input: InputState { left, right },
            command: None,
            restart: false,
        }
    }
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce,
    CeilingBounce,
    PaddleBounce,
    BrickDestroyed { row: usize, col: usize },
    /// The last live brick was destroyed this tick
    GridCleared,
    BallRespawned,
    /// Fresh grid, paddle and ball
    Restarted,
    PhaseChanged(GamePhase),
}

/// Paddle velocity from held keys. Right is checked after left, so holding
/// both moves right.
pub fn paddle_velocity(input: &InputState, speed: f32) -> f32 {
    let mut vel_x = 0.0;
    if input.left {
        vel_x = -speed;
    }
    if input.right {
        vel_x = speed;
    }
    vel_x
}

/// Advance the game state by `dt` seconds and report what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart && state.phase != GamePhase::Stopped {
        let before = state.phase;
        state.restart();
        events.push(GameEvent::Restarted);
        if state.phase != before {
            events.push(GameEvent::PhaseChanged(state.phase));
        }
    }

    if let Some(command) = input.command {
        let next = state.phase.apply(command);
        if next != state.phase {
            state.phase = next;
            events.push(GameEvent::PhaseChanged(next));
        }
    }

    if !state.is_running() {
        return events;
    }
    state.ticks += 1;

    let width = state.tuning.surface_width;
    let height = state.tuning.surface_height;

    // Paddle
    let paddle = &mut state.paddle;
    paddle.vel_x = paddle_velocity(&input.input, paddle.speed);
    paddle.pos.x += paddle.vel_x * dt;
    paddle.clamp_to(width);

    // Ball integration, resolved after the fact
    let ball = &mut state.ball;
    ball.pos += ball.vel * dt;

    if reflect_side_walls(ball, width) {
        events.push(GameEvent::WallBounce);
    }
    if reflect_ceiling(ball) {
        events.push(GameEvent::CeilingBounce);
    }

    if hits_paddle(ball, &state.paddle) {
        bounce_off_paddle(ball, &state.paddle);
        events.push(GameEvent::PaddleBounce);
    }

    // At most one brick per tick
    if let Some(index) = first_brick_hit(ball, &state.bricks) {
        if let Some(brick) = state.bricks.get_mut(index) {
            brick.destroy();
            ball.vel.y = -ball.vel.y;
            events.push(GameEvent::BrickDestroyed {
                row: brick.row,
                col: brick.col,
            });
        }
        if state.bricks.is_cleared() {
            events.push(GameEvent::GridCleared);
        }
    }

    if fell_out(&state.ball, height) {
        state.respawn_ball();
        events.push(GameEvent::BallRespawned);
    }

    events
}

/// Value-in, value-out form of [`tick`]
pub fn advance(mut state: GameState, input: &TickInput, dt: f32) -> (GameState, Vec<GameEvent>) {
    let events = tick(&mut state, input, dt);
    (state, events)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    /// Ball parked mid-surface, away from every surface and brick
    fn quiet_state() -> GameState {
        let mut state = GameState::default();
        state.ball.pos = Vec2::new(300.0, 250.0);
        state
    }

    #[test]
    fn test_paddle_velocity_from_keys() {
        let none = InputState::default();
        let left = InputState { left: true, right: false };
        let right = InputState { left: false, right: true };
        let both = InputState { left: true, right: true };
        assert_eq!(paddle_velocity(&none, 300.0), 0.0);
        assert_eq!(paddle_velocity(&left, 300.0), -300.0);
        assert_eq!(paddle_velocity(&right, 300.0), 300.0);
        assert_eq!(paddle_velocity(&both, 300.0), 300.0);
    }

    #[test]
    fn test_paddle_clamped_at_left_edge() {
        let mut state = quiet_state();
        assert_eq!(state.paddle.pos.x, 260.0);

        tick(&mut state, &TickInput::held(true, false), 1.0);
        assert_eq!(state.paddle.pos.x, 0.0);
        // Velocity survives the clamp
        assert_eq!(state.paddle.vel_x, -300.0);
    }

    #[test]
    fn test_paddle_clamped_at_right_edge() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::held(false, true), 1.0);
        assert_eq!(state.paddle.pos.x, 520.0);
    }

    #[test]
    fn test_paddle_moves_with_dt() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::held(false, true), 0.1);
        assert!((state.paddle.pos.x - 290.0).abs() < 1e-4);
    }

    #[test]
    fn test_left_wall_correction() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(3.0, 250.0);
        state.ball.vel = Vec2::new(-140.0, -140.0);

        let events = tick(&mut state, &TickInput::default(), 1e-4);
        assert_eq!(state.ball.pos.x, 6.0);
        assert_eq!(state.ball.vel.x, 140.0);
        assert!(events.contains(&GameEvent::WallBounce));
    }

    #[test]
    fn test_ceiling_bounce() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(300.0, 7.0);
        state.ball.vel = Vec2::new(140.0, -140.0);

        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.ball.pos.y, 6.0);
        assert_eq!(state.ball.vel.y, 140.0);
        assert_eq!(events, vec![GameEvent::CeilingBounce]);
    }

    #[test]
    fn test_paddle_bounce() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(300.0, 372.0);
        state.ball.vel = Vec2::new(140.0, 140.0);

        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.contains(&GameEvent::PaddleBounce));
        assert_eq!(state.ball.pos.y, 374.0);
        assert_eq!(state.ball.vel, Vec2::new(140.0, -140.0));
    }

    #[test]
    fn test_brick_row2_col0_destroyed() {
        let mut state = quiet_state();
        // Brick (2,0) spans x 20..68, y 94..110
        state.ball.pos = Vec2::new(44.0, 114.0);
        state.ball.vel = Vec2::new(0.0, -140.0);

        let events = tick(&mut state, &TickInput::default(), 1e-4);
        assert_eq!(events, vec![GameEvent::BrickDestroyed { row: 2, col: 0 }]);
        assert!(!state.bricks.get(2, 0).unwrap().alive);
        assert_eq!(state.ball.vel.y, 140.0);
        assert_eq!(state.bricks.alive_count(), 39);
    }

    #[test]
    fn test_only_first_overlapping_brick_dies() {
        let mut state = quiet_state();
        // Overlaps (1,0) and (1,1) across the padding gap
        state.ball.pos = Vec2::new(71.0, 80.0);
        state.ball.vel = Vec2::new(0.0, -140.0);

        let events = tick(&mut state, &TickInput::default(), 1e-4);
        assert_eq!(events, vec![GameEvent::BrickDestroyed { row: 1, col: 0 }]);
        assert!(state.bricks.get(1, 1).unwrap().alive);
        assert_eq!(state.bricks.alive_count(), 39);
    }

    #[test]
    fn test_lower_row_wins_tie() {
        let mut state = quiet_state();
        // Straddles rows 0 and 1 in column 0 (gap y 66..72)
        state.ball.pos = Vec2::new(44.0, 69.0);
        state.ball.vel = Vec2::new(0.0, 140.0);

        let events = tick(&mut state, &TickInput::default(), 1e-4);
        assert_eq!(events, vec![GameEvent::BrickDestroyed { row: 0, col: 0 }]);
        assert!(state.bricks.get(1, 0).unwrap().alive);
    }

    #[test]
    fn test_dead_bricks_are_skipped() {
        let mut state = quiet_state();
        state.bricks.get_mut(0).unwrap().destroy();
        state.ball.pos = Vec2::new(44.0, 60.0);
        state.ball.vel = Vec2::new(0.0, -140.0);

        let events = tick(&mut state, &TickInput::default(), 1e-4);
        assert!(events.is_empty());
        assert_eq!(state.ball.vel.y, -140.0);
    }

    #[test]
    fn test_grid_cleared_reported_once() {
        let tuning = Tuning {
            brick_rows: 1,
            brick_cols: 1,
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning);
        state.ball.pos = Vec2::new(44.0, 70.0);
        state.ball.vel = Vec2::new(0.0, -140.0);

        let events = tick(&mut state, &TickInput::default(), 1e-4);
        assert_eq!(
            events,
            vec![
                GameEvent::BrickDestroyed { row: 0, col: 0 },
                GameEvent::GridCleared
            ]
        );
        assert!(state.bricks.is_cleared());

        // Play goes on with an empty grid
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(!events.contains(&GameEvent::GridCleared));
        assert!(state.is_running());
    }

    #[test]
    fn test_fall_out_respawns() {
        let mut state = quiet_state();
        state.ball.pos = Vec2::new(100.0, 405.0);
        state.ball.vel = Vec2::new(-140.0, 140.0);

        let events = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(events, vec![GameEvent::BallRespawned]);
        assert_eq!(state.ball.pos, Vec2::new(300.0, 360.0));
        assert_eq!(state.ball.vel, Vec2::new(140.0, -140.0));
        assert_eq!(state.respawns, 1);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut state = quiet_state();
        let pause = TickInput {
            command: Some(PhaseCommand::Pause),
            ..TickInput::held(true, false)
        };
        let events = tick(&mut state, &pause, DT);
        assert_eq!(events, vec![GameEvent::PhaseChanged(GamePhase::Paused)]);

        let before = state.clone();
        let events = tick(&mut state, &TickInput::held(true, false), DT);
        assert!(events.is_empty());
        assert_eq!(state, before);

        let resume = TickInput {
            command: Some(PhaseCommand::TogglePause),
            ..TickInput::default()
        };
        let events = tick(&mut state, &resume, DT);
        assert_eq!(events, vec![GameEvent::PhaseChanged(GamePhase::Running)]);
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_stop_is_final() {
        let mut state = quiet_state();
        let stop = TickInput {
            command: Some(PhaseCommand::Stop),
            ..TickInput::default()
        };
        tick(&mut state, &stop, DT);
        assert_eq!(state.phase, GamePhase::Stopped);

        let resume = TickInput {
            command: Some(PhaseCommand::Resume),
            ..TickInput::default()
        };
        let events = tick(&mut state, &resume, DT);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Stopped);
        assert_eq!(state.ticks, 0);
    }

    #[test]
    fn test_restart_from_pause_reports_phase() {
        let mut state = quiet_state();
        state.bricks.get_mut(3).unwrap().destroy();
        state.phase = GamePhase::Paused;

        let restart = TickInput {
            restart: true,
            ..TickInput::default()
        };
        let events = tick(&mut state, &restart, DT);
        assert_eq!(
            events,
            vec![
                GameEvent::Restarted,
                GameEvent::PhaseChanged(GamePhase::Running)
            ]
        );
        assert!(state.is_running());
        assert_eq!(state.bricks.alive_count(), 40);
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_restart_while_running_keeps_phase() {
        let mut state = quiet_state();
        let restart = TickInput {
            restart: true,
            ..TickInput::default()
        };
        let events = tick(&mut state, &restart, DT);
        assert_eq!(events, vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_restart_ignored_when_stopped() {
        let mut state = quiet_state();
        state.phase = GamePhase::Stopped;
        let restart = TickInput {
            restart: true,
            ..TickInput::default()
        };
        assert!(tick(&mut state, &restart, DT).is_empty());
        assert_eq!(state.phase, GamePhase::Stopped);
    }

    #[test]
    fn test_advance_matches_tick() {
        let input = TickInput::held(false, true);
        let mut a = GameState::default();
        let mut b = GameState::default();
        for _ in 0..600 {
            tick(&mut a, &input, DT);
            b = advance(b, &input, DT).0;
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput::held(true, false),
            TickInput::default(),
            TickInput::held(false, true),
        ];
        let mut a = GameState::default();
        let mut b = GameState::default();
        for i in 0..3000 {
            let input = &inputs[(i / 50) % inputs.len()];
            let ea = tick(&mut a, input, DT);
            let eb = tick(&mut b, input, DT);
            assert_eq!(ea, eb);
        }
        assert_eq!(a, b);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>()).prop_map(|(l, r)| TickInput::held(l, r))
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_on_surface(
            steps in prop::collection::vec((arb_input(), 0.0f32..1.5), 1..200)
        ) {
            let mut state = GameState::default();
            let max_x = state.tuning.surface_width - state.paddle.width;
            for (input, dt) in &steps {
                tick(&mut state, input, *dt);
                prop_assert!(state.paddle.pos.x >= 0.0);
                prop_assert!(state.paddle.pos.x <= max_x);
            }
        }

        #[test]
        fn prop_ball_speed_conserved(
            steps in prop::collection::vec((arb_input(), 0.0f32..0.05), 1..400)
        ) {
            let mut state = GameState::default();
            let vx = state.ball.vel.x.abs();
            let vy = state.ball.vel.y.abs();
            for (input, dt) in &steps {
                tick(&mut state, input, *dt);
                prop_assert_eq!(state.ball.vel.x.abs(), vx);
                prop_assert_eq!(state.ball.vel.y.abs(), vy);
            }
        }

        #[test]
        fn prop_bricks_only_die_one_at_a_time(
            steps in prop::collection::vec((arb_input(), 0.0f32..0.05), 1..400)
        ) {
            let mut state = GameState::default();
            for (input, dt) in &steps {
                let before: Vec<bool> = state.bricks.iter().map(|b| b.alive).collect();
                tick(&mut state, input, *dt);
                let after: Vec<bool> = state.bricks.iter().map(|b| b.alive).collect();

                // Never resurrected
                for (was, is) in before.iter().zip(&after) {
                    prop_assert!(*was || !*is);
                }
                let killed = before.iter().zip(&after).filter(|(w, i)| **w && !**i).count();
                prop_assert!(killed <= 1);
            }
        }
    }
}
