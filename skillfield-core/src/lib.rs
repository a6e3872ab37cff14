pub mod config;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod interaction;
pub mod render;
pub mod runtime;
pub mod skills;

pub use config::PlaygroundConfig;
pub use engine::{radius_for_label, Container, Entity, EntityId, EntityStore};
pub use error::{PlaygroundError, PlaygroundResult};
pub use integrator::{contact, step, Contact, PhysicsParams};
pub use interaction::{apply_blast, DragState, InteractionController, PointerEvent, PointerResponse};
pub use render::{sync_display, DisplayLayer, TranslationBuffer};
pub use runtime::{
    advance_frame, build_simulation_context, build_simulation_context_from_config,
    get_entity_states, handle_pointer, step_simulation, EntityState, LoopState,
    SimulationContext,
};
pub use skills::{default_skills, load_skills, parse_skills_json, SkillRecord};
