//! Projectile kinematics and collision.
//!
//! Homing projectiles steer every tick and re-acquire on target loss;
//! everything else flies ballistic. Collisions enqueue damage for the
//! resolution phase; terminal projectiles go on the despawn buffer.

use hecs::{Entity, World};

use dharmapala_core::components::{Projectile, ProjectileState};
use dharmapala_core::constants::OOB_MARGIN;
use dharmapala_core::enums::ProjectileKind;
use dharmapala_core::types::{Position, Velocity};

use crate::pending::{HitRecord, TickQueue};
use crate::systems::EnemyRef;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    dt_ms: f64,
    width: f64,
    height: f64,
    enemies: &[EnemyRef],
    queue: &mut TickQueue,
    despawn_buffer: &mut Vec<Entity>,
) {
    let dt_secs = dt_ms / 1000.0;

    for (entity, (_, st, pos, vel)) in
        world.query_mut::<(&Projectile, &mut ProjectileState, &mut Position, &mut Velocity)>()
    {
        let target = st
            .target_id
            .and_then(|id| enemies.iter().find(|e| e.id == id));

        match st.kind {
            ProjectileKind::Homing => match target {
                Some(enemy) => {
                    let angle = pos.angle_to(&enemy.position);
                    vel.x = angle.cos() * st.speed;
                    vel.y = angle.sin() * st.speed;
                }
                None => {
                    // Re-acquire the nearest enemy not already pierced.
                    let next = enemies
                        .iter()
                        .filter(|e| !st.hit_ids.contains(&e.id))
                        .min_by(|a, b| {
                            let da = a.position.distance_to(pos);
                            let db = b.position.distance_to(pos);
                            da.partial_cmp(&db)
                                .unwrap_or(std::cmp::Ordering::Equal)
                                .then(a.id.cmp(&b.id))
                        });
                    match next {
                        Some(enemy) => st.target_id = Some(enemy.id),
                        None => {
                            st.wander_ms -= dt_ms;
                            if st.wander_ms <= 0.0 {
                                despawn_buffer.push(entity);
                                continue;
                            }
                        }
                    }
                }
            },
            _ => {
                if target.is_none() {
                    // Ballistic flight continues on the last velocity.
                    st.target_id = None;
                }
            }
        }

        pos.x += vel.x * dt_secs;
        pos.y += vel.y * dt_secs;

        if pos.x < -OOB_MARGIN
            || pos.y < -OOB_MARGIN
            || pos.x > width + OOB_MARGIN
            || pos.y > height + OOB_MARGIN
        {
            despawn_buffer.push(entity);
            continue;
        }

        if st.kind == ProjectileKind::Piercing {
            // A piercing shot damages every enemy it passes through, each
            // at most once.
            for enemy in enemies {
                if st.hit_ids.contains(&enemy.id) {
                    continue;
                }
                if enemy.position.distance_to(pos) <= enemy.radius + st.radius {
                    st.hit_ids.push(enemy.id);
                    queue.hits.push(HitRecord {
                        projectile_id: Some(st.id),
                        target_id: enemy.id,
                        damage: st.damage,
                        source_kind: Some(st.source_kind),
                        origin_defense_id: Some(st.origin_id),
                        impact: *pos,
                    });
                }
            }
        } else if let Some(enemy) = st.target_id.and_then(|id| enemies.iter().find(|e| e.id == id))
        {
            if enemy.position.distance_to(pos) <= enemy.radius + st.radius {
                queue.hits.push(HitRecord {
                    projectile_id: Some(st.id),
                    target_id: enemy.id,
                    damage: st.damage,
                    source_kind: Some(st.source_kind),
                    origin_defense_id: Some(st.origin_id),
                    impact: *pos,
                });
                despawn_buffer.push(entity);
            }
        }
    }
}
