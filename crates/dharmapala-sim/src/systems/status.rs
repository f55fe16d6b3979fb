//! Status-effect countdown system.
//!
//! One sweep over every actor's effect table: durations decrement by the
//! tick delta, expired effects vanish without events.

use hecs::World;

use dharmapala_core::status::StatusEffects;

pub fn run(world: &mut World, dt_ms: f64) {
    for (_entity, fx) in world.query_mut::<&mut StatusEffects>() {
        fx.tick(dt_ms);
    }
}
