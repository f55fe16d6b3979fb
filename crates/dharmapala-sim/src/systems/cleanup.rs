//! Cleanup system: prunes dead enemies and terminal projectiles.
//!
//! Earlier phases push terminal projectiles onto the despawn buffer; this
//! system adds finished enemies and despawns everything in one place.

use hecs::{Entity, World};

use dharmapala_core::components::{Enemy, EnemyState};

pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for (entity, (_, st)) in world.query_mut::<(&Enemy, &EnemyState)>() {
        if st.dead {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
