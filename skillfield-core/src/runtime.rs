use crate::config::PlaygroundConfig;
use crate::engine::{Container, EntityId, EntityStore};
use crate::error::{PlaygroundError, PlaygroundResult};
use crate::integrator::{step, PhysicsParams};
use crate::interaction::{InteractionController, PointerEvent, PointerResponse};
use crate::render::{sync_display, DisplayLayer};
use crate::skills::SkillRecord;
use glam::Vec2;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Snapshot of one entity for hosts that draw it
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState {
    pub id: EntityId,
    pub label: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub dragged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Cancelled,
}

/// Everything one mounted playground owns
#[derive(Debug)]
pub struct SimulationContext {
    store: EntityStore,
    pub container: Container,
    params: PhysicsParams,
    pub controller: InteractionController,
    pub frame: u64,
    gravity_strength: f32,
    zero_gravity: bool,
    loop_state: LoopState,
}

impl SimulationContext {
    /// Wrap an already populated store.
    ///
    /// Fails if any entity cannot fit inside the container.
    pub fn new(
        store: EntityStore,
        container: Container,
        params: PhysicsParams,
    ) -> PlaygroundResult<Self> {
        if let Some(entity) = store.iter().find(|e| !container.fits(e.radius())) {
            return Err(PlaygroundError::EntityTooLarge {
                label: entity.label().to_string(),
                radius: entity.radius(),
                width: container.width(),
                height: container.height(),
            });
        }

        Ok(Self {
            store,
            container,
            gravity_strength: params.gravity,
            zero_gravity: false,
            params,
            controller: InteractionController::new(),
            frame: 0,
            loop_state: LoopState::Running,
        })
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Effective constants, with the zero-gravity switch applied
    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn is_cancelled(&self) -> bool {
        self.loop_state == LoopState::Cancelled
    }

    /// Stop the frame loop; later calls to [`step_simulation`] do nothing
    pub fn cancel(&mut self) {
        if self.loop_state == LoopState::Running {
            debug!("simulation cancelled after {} frames", self.frame);
        }
        self.loop_state = LoopState::Cancelled;
    }

    pub fn zero_gravity(&self) -> bool {
        self.zero_gravity
    }

    pub fn set_zero_gravity(&mut self, enabled: bool) {
        self.zero_gravity = enabled;
        self.refresh_gravity();
    }

    pub fn gravity_strength(&self) -> f32 {
        self.gravity_strength
    }

    pub fn set_gravity_strength(&mut self, strength: f32) {
        self.gravity_strength = strength.max(0.0);
        self.refresh_gravity();
    }

    fn refresh_gravity(&mut self) {
        self.params.gravity = if self.zero_gravity {
            0.0
        } else {
            self.gravity_strength
        };
    }
}

/// Mount a playground: one entity per skill, dropped in from above the container
pub fn build_simulation_context<R: Rng + ?Sized>(
    skills: &[SkillRecord],
    container: Container,
    params: PhysicsParams,
    rng: &mut R,
) -> PlaygroundResult<SimulationContext> {
    let mut store = EntityStore::new();
    let spread = (container.width() - 100.0).max(0.0);

    for skill in skills {
        let pos = Vec2::new(
            rng.gen::<f32>() * spread + 50.0,
            -rng.gen::<f32>() * 500.0 - 50.0,
        );
        let vel = Vec2::new((rng.gen::<f32>() - 0.5) * 2.0, 0.0);
        store.spawn(skill.name.clone(), pos, vel);
    }

    let ctx = SimulationContext::new(store, container, params)?;
    debug!(
        "mounted {} entities in a {}x{} container",
        ctx.store.len(),
        container.width(),
        container.height()
    );
    Ok(ctx)
}

/// Mount a playground from config.
///
/// `viewport` is the host's size, used when the config does not fix one.
pub fn build_simulation_context_from_config(
    config: &PlaygroundConfig,
    skills: &[SkillRecord],
    viewport: Vec2,
) -> PlaygroundResult<SimulationContext> {
    config.validate()?;
    let width = config.container_width.unwrap_or(viewport.x);
    let height = config.container_height.unwrap_or(viewport.y);
    let container = Container::new(width, height)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut ctx = build_simulation_context(skills, container, config.physics_params(), &mut rng)?;
    ctx.gravity_strength = config.gravity_strength;
    ctx.set_zero_gravity(config.zero_gravity);
    Ok(ctx)
}

/// Advance one frame and push positions to the display.
///
/// Returns true once the loop has been cancelled.
pub fn step_simulation(ctx: &mut SimulationContext, layer: &mut dyn DisplayLayer) -> bool {
    advance_frame(ctx, layer, 1)
}

/// Advance one host frame made of `substeps` integrator steps (at least one).
///
/// Drag tracking runs once per host frame, before the first step, and the
/// display is synced once after the last. Returns true once the loop has been
/// cancelled.
pub fn advance_frame(
    ctx: &mut SimulationContext,
    layer: &mut dyn DisplayLayer,
    substeps: usize,
) -> bool {
    if ctx.is_cancelled() {
        return true;
    }

    ctx.controller.track_frame(&mut ctx.store);
    let pinned = ctx.controller.dragged();
    for _ in 0..substeps.max(1) {
        step(&mut ctx.store, &ctx.container, &ctx.params, pinned);
        ctx.frame += 1;
    }
    sync_display(&ctx.store, layer);
    false
}

/// Feed one pointer event to the playground
pub fn handle_pointer(ctx: &mut SimulationContext, event: PointerEvent) -> PointerResponse {
    if ctx.is_cancelled() {
        return PointerResponse::Ignored;
    }
    ctx.controller
        .handle(event, &mut ctx.store, &ctx.container, &ctx.params)
}

pub fn get_entity_states(ctx: &SimulationContext) -> Vec<EntityState> {
    let dragged = ctx.controller.dragged();
    ctx.store
        .iter()
        .map(|e| EntityState {
            id: e.id(),
            label: e.label().to_string(),
            pos: e.pos,
            vel: e.vel,
            radius: e.radius(),
            dragged: Some(e.id()) == dragged,
        })
        .collect()
}
