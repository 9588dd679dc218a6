//! Headless Geophagia front end.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Examples:
//!
//! `geophagia fbm --seed 7 --octaves 6 -o hills.png`
//! `geophagia --width 512 --depth 512 voronoi --centroids 40 -o plateaus.raw`
//! `geophagia convert hills.png hills.r32`
//! `geophagia inspect hills.r32`
//! `geophagia --width 128 show-config`

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use geophagia_app::{
    EditorSession, PlatformDirs, SessionError, fractal_generator, multifractal_generator,
    voronoi_generator,
};
use geophagia_config::{CliArgs, Config, ConfigError, NoiseMode};
use geophagia_mesh::{MeshTessellator, NullSink};
use geophagia_terrain::HeightmapGenerator;

#[derive(Parser, Debug)]
#[command(name = "geophagia", version, about = "Heightmap terrain generator")]
struct Cli {
    #[command(flatten)]
    global: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fractal Brownian motion over Perlin noise.
    Fbm {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, allow_negative_numbers = true)]
        octaves: Option<i32>,
        #[arg(long)]
        power_scale: Option<f32>,
        /// Destination file; `.raw`/`.r32` for floats, otherwise an image.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Ridged multifractal noise.
    Ridged {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, allow_negative_numbers = true)]
        octaves: Option<i32>,
        #[arg(long)]
        power_scale: Option<f32>,
        #[arg(long)]
        persistence: Option<f32>,
        #[arg(long)]
        lacunarity: Option<f32>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Nearest-centroid plateaus.
    Voronoi {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, allow_negative_numbers = true)]
        centroids: Option<i32>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Load a heightmap and write it in another format.
    Convert { input: PathBuf, output: PathBuf },
    /// Print dimensions, elevation range and mesh size of a heightmap.
    Inspect { input: PathBuf },
    /// Print the resolved directories and the effective configuration.
    ShowConfig,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let dirs = match &cli.global.config {
        Some(root) => PlatformDirs::resolve_with_root(root),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("{e}, using the current directory");
                PlatformDirs::resolve_with_root(Path::new("."))
            }
        },
    };

    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create app directories: {e}");
    }

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&cli.global);

    geophagia_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    match run(cli.command, config, &dirs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, mut config: Config, dirs: &PlatformDirs) -> Result<(), CliError> {
    match command {
        Command::Fbm {
            seed,
            octaves,
            power_scale,
            output,
        } => {
            let fractal = &mut config.fractal;
            override_with(&mut fractal.seed, seed);
            override_with(&mut fractal.octaves, octaves);
            override_with(&mut fractal.power_scale, power_scale);
            generate_to(&config, &fractal_generator(&config.fractal), &output)
        }
        Command::Ridged {
            seed,
            octaves,
            power_scale,
            persistence,
            lacunarity,
            output,
        } => {
            let fractal = &mut config.fractal;
            override_with(&mut fractal.seed, seed);
            override_with(&mut fractal.octaves, octaves);
            override_with(&mut fractal.power_scale, power_scale);
            override_with(&mut fractal.persistence, persistence);
            override_with(&mut fractal.lacunarity, lacunarity);
            let generator = multifractal_generator(&config.fractal, Some(NoiseMode::Ridged));
            generate_to(&config, &generator, &output)
        }
        Command::Voronoi {
            seed,
            centroids,
            output,
        } => {
            override_with(&mut config.voronoi.seed, seed);
            override_with(&mut config.voronoi.centroids, centroids);
            generate_to(&config, &voronoi_generator(&config.voronoi), &output)
        }
        Command::Convert { input, output } => {
            let mut session = headless_session(&config);
            session.load_file(&input)?;
            Ok(session.save_file(&output)?)
        }
        Command::Inspect { input } => {
            let mut session = headless_session(&config);
            session.load_file(&input)?;
            let field = session.field();
            let mesh = session.mesh();
            println!("{}", input.display());
            println!("  size:      {} x {}", field.width(), field.depth());
            if let Some((min, max)) = field.min_max() {
                println!("  elevation: {min} .. {max}");
            }
            println!("  vertices:  {}", mesh.vertices.len());
            println!("  triangles: {}", mesh.triangle_count());
            Ok(())
        }
        Command::ShowConfig => {
            println!("config: {}", dirs.config_dir.display());
            println!("data:   {}", dirs.data_dir.display());
            println!("logs:   {}", dirs.log_dir.display());
            match config.reload(&dirs.config_dir) {
                Ok(Some(_)) => println!("(command-line flags override the saved config)"),
                Ok(None) => {}
                Err(e) => tracing::warn!("saved config unreadable: {e}"),
            }
            print!("{}", config.to_ron_pretty()?);
            println!();
            Ok(())
        }
    }
}

fn generate_to(
    config: &Config,
    generator: &HeightmapGenerator,
    output: &Path,
) -> Result<(), CliError> {
    let mut session = EditorSession::from_config(&config.terrain, NullSink)?;
    session.generate(generator)?;
    Ok(session.save_file(output)?)
}

fn headless_session(config: &Config) -> EditorSession<NullSink> {
    EditorSession::new(MeshTessellator::new(config.terrain.texture_scale), NullSink)
}

fn override_with<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}
