//! Sarcomere Lattice - entry point
//!
//! Generates a sarcomere and reports its geometry counts.
//!
//! CLI Usage:
//!   cargo run                                  # Default 2:1 lattice, 500 rods
//!   cargo run -- -t 3 -n 127                   # 6:1 lattice, 127 myosin rods
//!   cargo run -- --load params.json            # Rehydrate from a saved file
//!   cargo run -- --save params.json            # Save the parameter set

use std::path::PathBuf;

use anyhow::Result;
use glam::Vec4;
use sarcomere_lattice::{
    config::{LatticeType, SarcomereParameters},
    export::{self, GeometryBuffers},
    geometry::Sarcomere,
};

struct CliArgs {
    lattice_type: LatticeType,
    num_rods: usize,
    d10: f32,
    actin_length: f32,
    engagement: f32,
    load: Option<PathBuf>,
    save: Option<PathBuf>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        lattice_type: LatticeType::TwoToOne,
        num_rods: 500,
        d10: 0.037,
        actin_length: 1.0,
        engagement: 0.0,
        load: None,
        save: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-t" | "--type" => {
                i += 1;
                if i < args.len() {
                    let ordinal: u8 = args[i].parse().unwrap_or(0);
                    cli.lattice_type =
                        LatticeType::try_from(ordinal).unwrap_or(LatticeType::TwoToOne);
                }
            }
            "-n" | "--rods" => {
                i += 1;
                if i < args.len() {
                    cli.num_rods = args[i].parse().unwrap_or(500);
                }
            }
            "--d10" => {
                i += 1;
                if i < args.len() {
                    cli.d10 = args[i].parse().unwrap_or(0.037);
                }
            }
            "-l" | "--actin-length" => {
                i += 1;
                if i < args.len() {
                    cli.actin_length = args[i].parse().unwrap_or(1.0);
                }
            }
            "-e" | "--engagement" => {
                i += 1;
                if i < args.len() {
                    cli.engagement = args[i].parse().unwrap_or(0.0);
                }
            }
            "--load" => {
                i += 1;
                if i < args.len() {
                    cli.load = Some(PathBuf::from(&args[i]));
                }
            }
            "--save" => {
                i += 1;
                if i < args.len() {
                    cli.save = Some(PathBuf::from(&args[i]));
                }
            }
            "--help" | "-h" => {
                println!("Sarcomere Lattice");
                println!();
                println!("Usage: sarcomere-lattice [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -t, --type N          Lattice type ordinal: 0=2:1 1=3:1 2=5:1 3=6:1");
                println!("  -n, --rods N          Requested myosin rod count (default: 500)");
                println!("      --d10 F           d10 lattice spacing in μm (default: 0.037)");
                println!("  -l, --actin-length F  Thin filament length in μm (default: 1.0)");
                println!("  -e, --engagement F    Myosin head engagement 0..1 (default: 0.0)");
                println!("      --load FILE       Load parameters from a JSON file");
                println!("      --save FILE       Save parameters to a JSON file");
                std::process::exit(0);
            }
            other => {
                eprintln!("unknown argument: {other}");
                std::process::exit(2);
            }
        }
        i += 1;
    }
    cli
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = parse_args();

    let params = match &cli.load {
        Some(path) => export::load_parameters(path)?,
        None => {
            let p = SarcomereParameters::new(
                cli.lattice_type,
                cli.d10,
                cli.actin_length,
                cli.num_rods,
                Vec4::new(0.0, 0.0, 0.0, 1.0),
            );
            p.validate().map_err(|e| anyhow::anyhow!(e))?;
            p
        }
    };

    log::info!("Sarcomere Lattice starting...");
    let mut sarcomere = Sarcomere::new(params);
    if cli.engagement > 0.0 {
        sarcomere.set_engagement(cli.engagement);
    }

    println!("=== Sarcomere Lattice ===\n");
    println!("Lattice type:        {:?}", sarcomere.lattice_type());
    println!("d10:                 {:.4} μm", sarcomere.params().d10);
    println!("Sarcomere length:    {:.4} μm", sarcomere.params().sarcomere_length);
    println!("Lattice radius:      {:.4} μm", sarcomere.radius());
    println!("Volume:              {:.6} μm³", sarcomere.volume());
    println!();
    println!("Myosin rods:         {}", sarcomere.num_myosin());
    println!("Actin rods:          {}", sarcomere.num_actin());
    println!("Actin monomers/rod:  {}", sarcomere.num_actin_monomers());
    println!("Troponin/rod:        {}", sarcomere.num_troponin());
    println!("LMM crowns/rod:      {}", sarcomere.num_lmm_offsets_per_rod());
    println!("HMM crowns/rod:      {}", sarcomere.num_hmm_offsets_per_rod());
    println!("Myosin heads/rod:    {}", sarcomere.num_myosin_heads());

    let buffers = GeometryBuffers::snapshot(&sarcomere);
    println!("\nPoint buffer total:  {} bytes", buffers.point_bytes());

    if let Some(path) = &cli.save {
        export::save_parameters(sarcomere.params(), path)?;
    }

    Ok(())
}
