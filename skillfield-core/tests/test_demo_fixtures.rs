//! The shipped demo config and fixture must stay loadable

use glam::Vec2;
use skillfield_core::{build_simulation_context_from_config, PlaygroundConfig};
use std::path::PathBuf;

fn demo_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("..");
    path.push("demos");
    path.push(filename);
    path
}

#[test]
fn test_demo_config_mounts() {
    let config = PlaygroundConfig::load(&demo_path("playground.toml")).expect("Failed to load demo config");
    let skills = config.skills().expect("Failed to load demo skills");
    assert_eq!(skills.len(), 18);

    let ctx = build_simulation_context_from_config(&config, &skills, Vec2::new(960.0, 600.0))
        .expect("demo playground should mount");
    assert_eq!(ctx.store().len(), 18);
}
