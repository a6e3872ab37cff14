mod playground_app;

use clap::{Parser, Subcommand};
use glam::Vec2;
use log::info;
use skillfield_core::{
    build_simulation_context_from_config, get_entity_states, handle_pointer, step_simulation,
    PlaygroundConfig, PlaygroundError, PointerEvent, PointerResponse, SkillRecord,
    TranslationBuffer,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skillfield")]
#[command(about = "Skillfield - a physics playground of skill labels", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive playground window
    Play {
        /// TOML config file (watched for changes)
        #[arg(long)]
        config: Option<PathBuf>,
        /// JSON skills fixture, overriding the config
        #[arg(long)]
        skills: Option<PathBuf>,
    },
    /// Simulate without a window and print the final entity states
    Run {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        skills: Option<PathBuf>,
        /// Number of frames to simulate
        #[arg(long, default_value_t = 600)]
        frames: u32,
        /// Container width when the config does not set one
        #[arg(long, default_value_t = 800.0)]
        width: f32,
        /// Container height when the config does not set one
        #[arg(long, default_value_t = 600.0)]
        height: f32,
        /// Click at X,Y before the first frame
        #[arg(long, value_parser = parse_point)]
        blast: Option<(f32, f32)>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { config, skills } => play(config, skills),
        Commands::Run {
            config,
            skills,
            frames,
            width,
            height,
            blast,
        } => run_headless(config.as_deref(), skills.as_deref(), frames, (width, height), blast),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Parse an `X,Y` pair
fn parse_point(s: &str) -> Result<(f32, f32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid coordinate '{}': {}", v.trim(), e))
    };
    Ok((parse(x)?, parse(y)?))
}

/// Config from `path`, or defaults, with an optional skills override applied
pub(crate) fn load_config(
    path: Option<&Path>,
    skills: Option<&Path>,
) -> Result<PlaygroundConfig, PlaygroundError> {
    let mut config = match path {
        Some(path) => PlaygroundConfig::load(path)?,
        None => PlaygroundConfig::default(),
    };
    if let Some(skills) = skills {
        config.skills_file = Some(skills.to_path_buf());
    }
    Ok(config)
}

fn play(config: Option<PathBuf>, skills: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    // Fail fast on a broken config before opening a window
    load_config(config.as_deref(), skills.as_deref())?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_title("Skillfield"),
        ..Default::default()
    };
    eframe::run_native(
        "Skillfield",
        options,
        Box::new(move |cc| {
            Ok(Box::new(playground_app::PlaygroundApp::new(config, skills, cc)))
        }),
    )?;
    Ok(())
}

fn run_headless(
    config_path: Option<&Path>,
    skills_path: Option<&Path>,
    frames: u32,
    viewport: (f32, f32),
    blast: Option<(f32, f32)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, skills_path)?;
    let skills: Vec<SkillRecord> = config.skills()?;
    let mut ctx =
        build_simulation_context_from_config(&config, &skills, Vec2::new(viewport.0, viewport.1))?;
    let mut display = TranslationBuffer::bound_to(ctx.store());

    if let Some((x, y)) = blast {
        if let PointerResponse::Blast { affected } =
            handle_pointer(&mut ctx, PointerEvent::Click(Vec2::new(x, y)))
        {
            info!("blast at ({}, {}) hit {} entities", x, y, affected);
        }
    }

    for _ in 0..frames {
        step_simulation(&mut ctx, &mut display);
    }
    ctx.cancel();

    for entity in get_entity_states(&ctx) {
        println!(
            "{} {:.3} {:.3} {:.3} {:.3}",
            entity.label, entity.pos.x, entity.pos.y, entity.vel.x, entity.vel.y
        );
    }

    Ok(())
}
