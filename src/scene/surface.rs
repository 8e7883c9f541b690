use std::collections::HashMap;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::frame::*;
use crate::camera::SceneCamera;

/// Marks an entity spawned to present a drawable
#[derive(Component, Debug)]
pub struct Presented(pub DrawableId);

struct PresentedDrawable {
    entity: Entity,
    shape: Shape,
    surface: Surface,
    material: Handle<StandardMaterial>,
}

/// Entities currently standing in for frame drawables and lights
#[derive(Resource, Default)]
pub struct PresentedEntities {
    drawables: HashMap<DrawableId, PresentedDrawable>,
    lights: Vec<Entity>,
}

impl PresentedEntities {
    pub fn entity(&self, id: DrawableId) -> Option<Entity> {
        self.drawables.get(&id).map(|presented| presented.entity)
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }
}

/// Presents frames through Bevy's renderer by reconciling drawables with
/// mesh entities: new ids spawn, known ids update in place, missing ids
/// despawn.
#[derive(SystemParam)]
pub struct BevySurface<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    presented: ResMut<'w, PresentedEntities>,
    transforms: Query<'w, 's, &'static mut Transform, (With<Presented>, Without<SceneCamera>)>,
    cameras: Query<'w, 's, &'static mut Transform, (With<SceneCamera>, Without<Presented>)>,
}

impl BevySurface<'_, '_> {
    fn present_lights(&mut self, lights: &[Light]) {
        // Lights never change during a session
        if !self.presented.lights.is_empty() {
            return;
        }
        for light in lights {
            let entity = match *light {
                Light::Ambient { color, brightness } => self
                    .commands
                    .spawn(AmbientLight {
                        color,
                        brightness,
                        affects_lightmapped_meshes: true,
                    })
                    .id(),
                Light::Point { position } => self
                    .commands
                    .spawn((
                        PointLight {
                            shadows_enabled: true,
                            ..default()
                        },
                        Transform::from_translation(position),
                    ))
                    .id(),
            };
            self.presented.lights.push(entity);
        }
    }

    fn present_drawable(&mut self, drawable: &Drawable) {
        if let Some(presented) = self.presented.drawables.get_mut(&drawable.id)
            && presented.shape == drawable.shape
        {
            if let Ok(mut transform) = self.transforms.get_mut(presented.entity) {
                *transform = drawable.transform;
            }
            if presented.surface != drawable.surface {
                if let Some(mut material) = self.materials.get_mut(&presented.material) {
                    apply_surface(&mut material, &drawable.surface);
                }
                presented.surface = drawable.surface;
            }
            return;
        }

        // Unknown id, or the shape changed under the same id
        self.retire(drawable.id);

        let mesh = self.meshes.add(mesh_for(&drawable.shape));
        let mut material = StandardMaterial::default();
        apply_surface(&mut material, &drawable.surface);
        let material = self.materials.add(material);

        let entity = self
            .commands
            .spawn((
                Presented(drawable.id),
                Mesh3d(mesh),
                MeshMaterial3d(material.clone()),
                drawable.transform,
            ))
            .id();

        self.presented.drawables.insert(
            drawable.id,
            PresentedDrawable {
                entity,
                shape: drawable.shape,
                surface: drawable.surface,
                material,
            },
        );
    }

    fn retire(&mut self, id: DrawableId) {
        if let Some(presented) = self.presented.drawables.remove(&id) {
            self.commands.entity(presented.entity).despawn();
            self.materials.remove(&presented.material);
        }
    }
}

impl RenderSurface for BevySurface<'_, '_> {
    fn present(&mut self, frame: &Frame) {
        self.present_lights(&frame.lights);

        for drawable in &frame.drawables {
            self.present_drawable(drawable);
        }

        let stale: Vec<DrawableId> = self
            .presented
            .drawables
            .keys()
            .filter(|id| frame.drawable(**id).is_none())
            .copied()
            .collect();
        for id in stale {
            self.retire(id);
        }

        for mut transform in &mut self.cameras {
            *transform = frame.camera;
        }
    }
}

fn mesh_for(shape: &Shape) -> Mesh {
    match *shape {
        Shape::Cuboid { size } => Cuboid::from_size(size).into(),
        Shape::Plane { size, normal } => Plane3d::default()
            .mesh()
            .size(size.x, size.y)
            .normal(normal)
            .into(),
    }
}

fn apply_surface(material: &mut StandardMaterial, surface: &Surface) {
    material.base_color = surface.color.with_alpha(surface.opacity);
    material.unlit = surface.unlit;
    material.alpha_mode = if surface.is_transparent() {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    };
}

/// Hands the composed frame to Bevy's renderer
pub fn present_frame(frame: Res<Frame>, mut surface: BevySurface) {
    surface.present(&frame);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::camera::{frame as camera_frame, CameraRig};
    use crate::player::Body;
    use crate::scene::{compose, SceneSnapshot};
    use crate::trace::{TraceArena, TraceDecay};
    use crate::world::{Collectible, Mode};

    const LIFETIME: Duration = Duration::from_millis(1000);

    fn surface_world() -> (World, Schedule, Entity) {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        world.init_resource::<PresentedEntities>();
        world.init_resource::<Frame>();
        let camera = world.spawn((SceneCamera, Transform::default())).id();

        let mut schedule = Schedule::default();
        schedule.add_systems(present_frame);
        (world, schedule, camera)
    }

    fn scene_frame(
        position: Vec3,
        mode: Mode,
        collectible: &Collectible,
        traces: &TraceArena,
    ) -> Frame {
        let body = Body::at(position);
        compose(&SceneSnapshot {
            body: &body,
            mode,
            collectible: Some(collectible),
            traces,
            camera: camera_frame(position, mode, &CameraRig::default()),
        })
    }

    fn present(world: &mut World, schedule: &mut Schedule, frame: &Frame) {
        world.insert_resource(frame.clone());
        schedule.run(world);
    }

    fn entity(world: &World, id: DrawableId) -> Entity {
        world.resource::<PresentedEntities>().entity(id).unwrap()
    }

    fn presented_count(world: &mut World) -> usize {
        world
            .query_filtered::<(), With<Presented>>()
            .iter(world)
            .count()
    }

    fn light_count(world: &mut World) -> usize {
        world.query::<&AmbientLight>().iter(world).count()
            + world.query::<&PointLight>().iter(world).count()
    }

    fn alpha(world: &World, entity: Entity) -> f32 {
        let handle = &world
            .get::<MeshMaterial3d<StandardMaterial>>(entity)
            .unwrap()
            .0;
        world
            .resource::<Assets<StandardMaterial>>()
            .get(handle)
            .unwrap()
            .base_color
            .alpha()
    }

    #[test]
    fn present_frame_reconciles_entities_across_the_mode_switch() {
        let (mut world, mut schedule, camera) = surface_world();
        assert!(world.resource::<PresentedEntities>().is_empty());

        let mut collectible = Collectible::new(Vec3::new(5.0, 0.0, 5.0));
        let mut traces = TraceArena::default();
        traces.on_landed(Vec3::new(1.0, -1.0, 0.0), Duration::ZERO);
        traces.on_landed(Vec3::new(2.0, -1.0, 0.0), Duration::from_millis(500));

        // Free roam: background, player, collectible, two traces
        let free_roam = scene_frame(Vec3::ZERO, Mode::FreeRoam, &collectible, &traces);
        present(&mut world, &mut schedule, &free_roam);

        assert_eq!(world.resource::<PresentedEntities>().len(), 5);
        assert_eq!(presented_count(&mut world), 5);
        assert_eq!(light_count(&mut world), 2);
        assert_eq!(*world.get::<Transform>(camera).unwrap(), free_roam.camera);

        let grid = entity(&world, DrawableId::Background);
        let collectible_entity = entity(&world, DrawableId::Collectible);
        let first_slot = entity(&world, DrawableId::Trace(0));
        let second_slot = entity(&world, DrawableId::Trace(1));
        assert_eq!(alpha(&world, second_slot), 1.0);

        // Slot 0 expires and is reused by a new landing; the pickup flips the mode
        traces.tick(Duration::from_millis(1000), LIFETIME, TraceDecay::Continuous);
        traces.on_landed(Vec3::new(3.0, 0.0, 0.0), Duration::from_millis(1000));
        collectible.active = false;

        let position = Vec3::new(4.5, 0.0, 4.5);
        let platform = scene_frame(position, Mode::Platform, &collectible, &traces);
        present(&mut world, &mut schedule, &platform);

        let presented = world.resource::<PresentedEntities>();
        assert_eq!(presented.len(), 4);
        assert_eq!(presented.entity(DrawableId::Collectible), None);
        assert!(world.get_entity(collectible_entity).is_err());

        let backdrop = entity(&world, DrawableId::Background);
        assert_ne!(backdrop, grid);
        assert!(world.get_entity(grid).is_err());
        assert_eq!(
            *world.get::<Transform>(backdrop).unwrap(),
            Transform::from_xyz(0.0, 0.0, -0.1)
        );

        assert_eq!(entity(&world, DrawableId::Trace(0)), first_slot);
        assert_eq!(
            world.get::<Transform>(first_slot).unwrap().translation,
            Vec3::new(3.0, 0.0, 0.0)
        );
        assert_eq!(entity(&world, DrawableId::Trace(1)), second_slot);
        let faded = alpha(&world, second_slot);
        assert!(faded > 0.0 && faded < 1.0);

        assert_eq!(presented_count(&mut world), 4);
        assert_eq!(light_count(&mut world), 2);
        assert_eq!(*world.get::<Transform>(camera).unwrap(), platform.camera);

        // Slot 1 expires; only its entity goes away
        traces.tick(Duration::from_millis(1500), LIFETIME, TraceDecay::Continuous);
        let later = scene_frame(position, Mode::Platform, &collectible, &traces);
        present(&mut world, &mut schedule, &later);

        let presented = world.resource::<PresentedEntities>();
        assert_eq!(presented.len(), 3);
        assert_eq!(presented.entity(DrawableId::Trace(1)), None);
        assert!(world.get_entity(second_slot).is_err());
        assert!(world.get_entity(first_slot).is_ok());
        assert_eq!(presented_count(&mut world), 3);
        assert_eq!(light_count(&mut world), 2);
    }

    #[test]
    fn camera_follows_every_presented_frame() {
        let (mut world, mut schedule, camera) = surface_world();
        let collectible = Collectible::new(Vec3::new(5.0, 0.0, 5.0));
        let traces = TraceArena::default();

        for x in [0.0, 1.0, 2.0] {
            let position = Vec3::new(x, 0.0, 0.0);
            let frame = scene_frame(position, Mode::FreeRoam, &collectible, &traces);
            present(&mut world, &mut schedule, &frame);
            assert_eq!(*world.get::<Transform>(camera).unwrap(), frame.camera);
        }
        assert_eq!(world.resource::<PresentedEntities>().len(), 3);
        assert_eq!(presented_count(&mut world), 3);
    }

    #[test]
    fn transparent_surfaces_blend() {
        let mut material = StandardMaterial::default();
        apply_surface(
            &mut material,
            &Surface::lit(Color::srgb(0.5, 0.5, 0.5)).with_opacity(0.4),
        );
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
        assert!((material.base_color.alpha() - 0.4).abs() < 1e-6);

        apply_surface(&mut material, &Surface::unlit(Color::WHITE));
        assert_eq!(material.alpha_mode, AlphaMode::Opaque);
        assert!(material.unlit);
    }
}
