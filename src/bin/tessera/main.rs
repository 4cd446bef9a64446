//! Tessera CLI - runs the mesh estimators on generated shapes.
//!
//! Usage: tessera <COMMAND> [OPTIONS]
//!
//! Run `tessera --help` for available commands. Set `RUST_LOG=debug` for
//! library diagnostics.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};

use tessera::algo::{curvature, normals, smooth, Progress};
use tessera::mesh::{primitives, Mesh, Topology, VertexId};

#[derive(Parser)]
#[command(name = "tessera")]
#[command(author, version, about = "Mesh curvature and smoothing CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh and topology information
    Info {
        #[command(flatten)]
        shape: ShapeArgs,
    },

    /// Estimate curvature
    Curvature {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Number of vertices to print
        #[arg(short = 'n', long, default_value = "5")]
        vertices: usize,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Smooth a mesh
    Smooth {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Smoothing method
        #[arg(short, long, value_enum, default_value = "laplacian")]
        method: SmoothMethod,

        /// Number of iterations
        #[arg(short, long, default_value = "1")]
        iterations: usize,

        /// Diffusion rate (values outside (0, 1] may overshoot)
        #[arg(short, long, default_value = "0.5", allow_negative_numbers = true)]
        rate: f64,

        /// Allow border vertices to move
        #[arg(long)]
        move_border: bool,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

#[derive(Args)]
struct ShapeArgs {
    /// Shape to generate
    #[arg(short, long, value_enum, default_value = "icosphere")]
    shape: Shape,

    /// Subdivision level for the icosphere
    #[arg(long, default_value = "3")]
    subdivisions: usize,

    /// Grid cells per side, or cylinder segments
    #[arg(long, default_value = "32")]
    resolution: usize,

    /// Height of the jagged grid noise
    #[arg(long, default_value = "0.05")]
    amplitude: f64,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Shape {
    /// Regular icosahedron
    Icosahedron,
    /// Subdivided icosahedron on the unit sphere
    Icosphere,
    /// Flat unit grid
    Grid,
    /// Unit grid with checkerboard noise
    JaggedGrid,
    /// Open unit cylinder
    Cylinder,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SmoothMethod {
    /// Uniform Laplacian smoothing
    Laplacian,
    /// Normalized curvature flow
    Flow,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { shape } => {
            cmd_info(&shape)?;
        }

        Commands::Curvature {
            shape,
            vertices,
            sequential,
        } => {
            cmd_curvature(&shape, vertices, sequential)?;
        }

        Commands::Smooth {
            shape,
            method,
            iterations,
            rate,
            move_border,
            sequential,
        } => {
            let mut options = smooth::SmoothOptions::default()
                .with_iterations(iterations)
                .with_diffusion_rate(rate)
                .with_parallel(!sequential);
            if move_border {
                options = options.allow_border_movement();
            }
            cmd_smooth(&shape, method, &options)?;
        }
    }

    Ok(())
}

fn generate(args: &ShapeArgs) -> tessera::error::Result<Mesh> {
    let mesh: Mesh = match args.shape {
        Shape::Icosahedron => primitives::icosahedron()?,
        Shape::Icosphere => primitives::icosphere(args.subdivisions)?,
        Shape::Grid => primitives::plane_grid(args.resolution, 1.0)?,
        Shape::JaggedGrid => primitives::jagged_grid(args.resolution, 1.0, args.amplitude)?,
        Shape::Cylinder => primitives::open_cylinder(args.resolution, args.resolution / 4 + 1)?,
    };
    println!(
        "Generated: {} vertices, {} faces",
        mesh.num_vertices(),
        mesh.num_faces()
    );
    Ok(mesh)
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Only redraw when the bar advances
        let previous = max_percent.fetch_max(percent, Ordering::Relaxed);
        if percent <= previous && percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        eprint!(
            "\r[{}{}] {:3}% {}",
            "=".repeat(filled),
            " ".repeat(bar_width - filled),
            percent,
            message
        );
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_info(args: &ShapeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = generate(args)?;

    let start = Instant::now();
    let topology = Topology::build(&mesh);
    let elapsed = start.elapsed();

    println!("Edges: {}", topology.num_edges());
    println!("Surface area: {:.6}", mesh.surface_area());

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    let border = topology.border_vertices();
    if border.is_empty() {
        println!("Topology: Closed (no border)");
    } else {
        println!("Topology: Open ({} border vertices)", border.len());
    }
    let isolated = mesh.vertex_ids().filter(|&v| topology.is_isolated(v)).count();
    if isolated > 0 {
        println!("Isolated vertices: {}", isolated);
    }

    let face_normals = normals::compute_normals(&mesh);
    println!("Degenerate faces: {}", face_normals.degenerate_faces.len());
    println!("Topology built in {:.2?}", elapsed);

    Ok(())
}

fn cmd_curvature(
    args: &ShapeArgs,
    vertices: usize,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = generate(args)?;
    let topology = Topology::build(&mesh);

    let mode = if sequential { "sequential" } else { "parallel" };
    let start = Instant::now();
    let field = if sequential {
        curvature::compute_curvature_sequential(&mesh, &topology)?
    } else {
        curvature::compute_curvature(&mesh, &topology)?
    };
    let elapsed = start.elapsed();
    println!("Curvature computed ({}, {:.2?})", mode, elapsed);

    if !field.degenerate_faces().is_empty() {
        println!("Skipped {} degenerate faces", field.degenerate_faces().len());
    }

    for i in 0..vertices.min(mesh.num_vertices()) {
        let v = VertexId::new(i);
        let (k1, k2) = field.principal(v);
        let border = if topology.is_border_vertex(v) {
            " (border)"
        } else {
            ""
        };
        println!(
            "  {:?}: K={:.4}  H={:.4}  k1={:.4}  k2={:.4}{}",
            v,
            field.gaussian(v),
            field.mean(v),
            k1,
            k2,
            border
        );
    }

    // Gauss-Bonnet check
    let total: f64 = field
        .gaussian_values()
        .iter()
        .zip(field.mixed_areas())
        .map(|(k, a)| k * a)
        .sum();
    println!(
        "Total curvature / 2π: {:.4}",
        total / (2.0 * std::f64::consts::PI)
    );

    Ok(())
}

fn cmd_smooth(
    args: &ShapeArgs,
    method: SmoothMethod,
    options: &smooth::SmoothOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = generate(args)?;
    let topology = Topology::build(&mesh);
    let area_before = mesh.surface_area();

    let mode = if options.parallel {
        "parallel"
    } else {
        "sequential"
    };
    let progress = create_progress();

    let start = Instant::now();
    let report = match method {
        SmoothMethod::Laplacian => {
            println!(
                "Applying uniform Laplacian smoothing ({} iterations, rate={}, {})...",
                options.iterations, options.diffusion_rate, mode
            );
            smooth::uniform_laplacian_smooth_with_progress(&mut mesh, &topology, options, &progress)?
        }
        SmoothMethod::Flow => {
            println!(
                "Applying curvature flow ({} iterations, rate={}, {})...",
                options.iterations, options.diffusion_rate, mode
            );
            smooth::curvature_flow_smooth_with_progress(&mut mesh, &topology, options, &progress)?
        }
    };
    let elapsed = start.elapsed();

    println!(
        "Completed {} iterations ({:.2?}), max displacement {:.6}",
        report.iterations_completed, elapsed, report.max_displacement
    );
    println!(
        "Surface area: {:.6} -> {:.6}",
        area_before,
        mesh.surface_area()
    );

    report.into_result()?;
    Ok(())
}
