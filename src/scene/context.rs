// The simulation context.
//
// Owns all mutable walkthrough state - the ECS world with props and NPCs,
// the player, the RNG, the exclusion zone - and drives one update tick.
// No globals: everything an update needs is a field here or an argument.

use std::f32::consts::FRAC_PI_2;

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::animation::{AnimationPlayer, Clip};
use super::components::{Prop, RenderNode, Transform};
use super::config::SceneConfig;
use super::input::KeySnapshot;
use super::placement::{
    Edge, EdgeScatter, PlacementError, RandomScatter, sample_clear_point, scatter_edge,
    scatter_random,
};
use super::player::Player;
use super::renderer::{ModelHandle, NodeId, SceneRenderer};
use super::wander::{Wanderer, update_wanderers};
use super::zone::{ExclusionZone, Rect};

pub struct Scene {
    pub world: World,
    pub player: Player,
    player_node: Option<NodeId>,
    zone: ExclusionZone,
    catchment: Rect,
    config: SceneConfig,
    rng: StdRng,
}

impl Scene {
    /// Build the scene: load models, run the one-shot placement batch and
    /// spawn every entity.
    ///
    /// A model that fails to load is logged and the placements keyed to it
    /// are skipped; the rest of the scene still builds. A zone that rejects
    /// every sample is a configuration error and surfaces as
    /// [`PlacementError::ZoneSaturated`].
    pub fn build(
        config: SceneConfig,
        renderer: &mut dyn SceneRenderer,
    ) -> Result<Self, PlacementError> {
        let zone = config.zone();
        let catchment = config.catchment();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut world = World::new();

        // Landmark: one static node at the origin.
        if let Some(model) = try_load(renderer, &config.assets.landmark) {
            let transform = Transform {
                position: Vec3::ZERO,
                yaw: 0.0,
                scale: config.landmark_scale,
            };
            spawn_prop(&mut world, renderer, model, transform);
        }

        // Bushes: deterministic scatter along the path and base edges.
        if let Some(model) = try_load(renderer, &config.assets.bush) {
            let mut placed = 0;
            for spec in bush_edges(&config) {
                for inst in scatter_edge(&spec, &zone) {
                    spawn_prop(&mut world, renderer, model, Transform::from(inst));
                    placed += 1;
                }
            }
            log::info!("placed {placed} bushes");
        }

        // Trees: rejection-sampled over the whole ground.
        if let Some(model) = try_load(renderer, &config.assets.tree) {
            let spec = RandomScatter {
                count: config.tree_count,
                height: 0.0,
                scale_min: config.tree_scale_min,
                scale_max: config.tree_scale_max,
            };
            for inst in scatter_random(&config.ground(), &spec, &zone, &mut rng)? {
                spawn_prop(&mut world, renderer, model, Transform::from(inst));
            }
            log::info!("placed {} trees", config.tree_count);
        }

        // NPCs: rejection-sampled spawn points, each with an initial target.
        if let Some(model) = try_load(renderer, &config.assets.npc) {
            for _ in 0..config.npc_count {
                let spawn = sample_clear_point(&catchment, &zone, &mut rng)?;
                let target = sample_clear_point(&catchment, &zone, &mut rng)?;
                let transform = Transform::from_position(Vec3::new(
                    spawn.x,
                    config.npc_height,
                    spawn.y,
                ));
                let node =
                    renderer.add_node(model, transform.position, transform.yaw, transform.scale);
                world.spawn((
                    transform,
                    Wanderer {
                        target,
                        speed: config.npc_speed,
                    },
                    AnimationPlayer::new(Clip::Walk),
                    RenderNode(node),
                ));
            }
            log::info!("spawned {} npcs", config.npc_count);
        }

        // Player avatar and its trailing camera.
        let player = Player::new(
            Vec3::from(config.player_start),
            Vec3::from(config.camera_offset),
        );
        let player_node = try_load(renderer, &config.assets.player)
            .map(|model| renderer.add_node(model, player.position, player.yaw, 1.0));

        Ok(Self {
            world,
            player,
            player_node,
            zone,
            catchment,
            config,
            rng,
        })
    }

    /// One simulation tick: the player first, then every NPC, strictly
    /// sequential. Pushes the updated transforms to the renderer; the host
    /// calls `render()` afterwards.
    pub fn update(
        &mut self,
        keys: &KeySnapshot,
        dt: f32,
        renderer: &mut dyn SceneRenderer,
    ) -> Result<(), PlacementError> {
        self.player.update(keys, dt);
        if let Some(node) = self.player_node {
            renderer.set_node_transform(node, self.player.position, self.player.yaw);
        }

        update_wanderers(&mut self.world, dt, &self.catchment, &self.zone, &mut self.rng)?;

        let mut query = self
            .world
            .query_filtered::<(&Transform, &RenderNode), With<Wanderer>>();
        for (transform, node) in query.iter(&self.world) {
            renderer.set_node_transform(node.0, transform.position, transform.yaw);
        }
        Ok(())
    }

    /// Remove every node this scene added to the renderer and drop the
    /// entities. The wander controllers cease with the world.
    pub fn teardown(&mut self, renderer: &mut dyn SceneRenderer) {
        let mut query = self.world.query::<&RenderNode>();
        for node in query.iter(&self.world) {
            renderer.remove_node(node.0);
        }
        if let Some(node) = self.player_node.take() {
            renderer.remove_node(node);
        }
        self.world.clear_entities();
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn npc_count(&mut self) -> usize {
        self.world.query::<&Wanderer>().iter(&self.world).count()
    }

    pub fn prop_count(&mut self) -> usize {
        self.world.query::<&Prop>().iter(&self.world).count()
    }

    /// Current NPC ground positions, for diagnostics.
    pub fn npc_positions(&mut self) -> Vec<Vec2> {
        self.world
            .query_filtered::<&Transform, With<Wanderer>>()
            .iter(&self.world)
            .map(|t| Vec2::new(t.position.x, t.position.z))
            .collect()
    }
}

fn spawn_prop(
    world: &mut World,
    renderer: &mut dyn SceneRenderer,
    model: ModelHandle,
    transform: Transform,
) {
    let node = renderer.add_node(model, transform.position, transform.yaw, transform.scale);
    world.spawn((transform, Prop, RenderNode(node)));
}

fn try_load(renderer: &mut dyn SceneRenderer, path: &str) -> Option<ModelHandle> {
    match renderer.load_model(path) {
        Ok(model) => Some(model),
        Err(err) => {
            log::error!("{err}; skipping dependent placements");
            None
        }
    }
}

/// The six bush edge lines: both sides of the pedestrian path across the
/// full ground span, and the four edges of the landmark base.
fn bush_edges(config: &SceneConfig) -> Vec<EdgeScatter> {
    let path_x = config.path_half_width + config.clearance;
    let base_edge = config.base_half + config.clearance;
    let base_span = config.base_half * 2.0;
    let mut edges = Vec::with_capacity(6);

    for x in [-path_x, path_x] {
        edges.push(EdgeScatter {
            edge: Edge::AlongZ { x },
            span: config.ground_extent,
            spacing: config.bush_spacing,
            yaw: FRAC_PI_2,
            height: config.bush_height,
            scale: config.bush_scale,
        });
    }
    for z in [-base_edge, base_edge] {
        edges.push(EdgeScatter {
            edge: Edge::AlongX { z },
            span: base_span,
            spacing: config.bush_spacing,
            yaw: 0.0,
            height: config.bush_height,
            scale: config.bush_scale,
        });
    }
    for x in [-base_edge, base_edge] {
        edges.push(EdgeScatter {
            edge: Edge::AlongZ { x },
            span: base_span,
            spacing: config.bush_spacing,
            yaw: FRAC_PI_2,
            height: config.bush_height,
            scale: config.bush_scale,
        });
    }
    edges
}
