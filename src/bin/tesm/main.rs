//! tesm CLI - export scenes to FULHAX and inspect .tesm files.

use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use tesm::export::export_scene;
use tesm::fulhax::{IArchive, Node, NodeType};
use tesm::scene::SceneDescription;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Program name, log level and the remaining arguments.
struct CliArgs<'a> {
    prog: &'a str,
    level: &'static str,
    rest: Vec<&'a str>,
}

fn parse_args(args: &[String]) -> CliArgs<'_> {
    let prog = args.first().map_or("tesm-cli", String::as_str);

    // Parse global flags
    let mut level = "info";
    let mut rest: Vec<&str> = Vec::new();
    for arg in args.get(1..).unwrap_or_default() {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "error",
            other => rest.push(other),
        }
    }
    CliArgs { prog, level, rest }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let CliArgs {
        prog,
        level,
        rest: filtered_args,
    } = parse_args(&args);
    init_tracing(level);

    if filtered_args.is_empty() {
        print_usage(prog);
        return;
    }

    let result = match filtered_args[0] {
        "info" | "i" => match filtered_args.get(1) {
            Some(path) => cmd_info(path),
            None => usage_error(prog, "info <file.tesm>"),
        },
        "dump" | "d" => match filtered_args.get(1) {
            Some(path) => cmd_dump(path),
            None => usage_error(prog, "dump <file.tesm>"),
        },
        "export" | "e" => match (filtered_args.get(1), filtered_args.get(2)) {
            (Some(input), Some(output)) => cmd_export(input, output),
            _ => usage_error(prog, "export <scene.json> <out.tesm>"),
        },
        "help" | "h" | "-h" | "--help" => {
            print_usage(prog);
            Ok(())
        }
        other => {
            // Assume it's a file path
            if Path::new(other).exists() {
                cmd_info(other)
            } else {
                eprintln!("Unknown command: {}", other);
                print_usage(prog);
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `FULHAX_LOG` overrides the level picked by the verbosity flags.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_env("FULHAX_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_usage(prog: &str) {
    println!("tesm CLI - FULHAX scene exporter");
    println!();
    println!("Usage: {} [options] <command> <args>", prog);
    println!();
    println!("Commands:");
    println!("  i, info <file.tesm>                 Show record summary");
    println!("  d, dump <file.tesm>                 List every record");
    println!("  e, export <scene.json> <out.tesm>   Export a scene description");
    println!("  h, help                             Show this help");
    println!();
    println!("Options:");
    println!("  -v, --verbose  Debug output");
    println!("  -vv, --trace   Trace output (very verbose)");
    println!("  -q, --quiet    Errors only");
    println!();
    println!("Environment:");
    println!("  FULHAX_LOG     tracing filter, e.g. FULHAX_LOG=tesm=trace");
}

fn usage_error(prog: &str, usage: &str) -> tesm::Result<()> {
    eprintln!("Error: missing argument");
    eprintln!("Usage: {} {}", prog, usage);
    std::process::exit(1);
}

fn cmd_info(path: &str) -> tesm::Result<()> {
    info!("Opening archive: {}", path);
    let archive = IArchive::open(path)?;

    let mut counts: BTreeMap<u16, (usize, u64)> = BTreeMap::new();
    let mut total = 0usize;
    for record in archive.records() {
        let record = record?;
        let entry = counts.entry(record.header.type_tag).or_default();
        entry.0 += 1;
        entry.1 += record.header.payload_size as u64;
        total += 1;
    }
    debug!("Counted {} records", total);

    println!("Archive: {}", path);
    println!("Size:    {} bytes", archive.size());
    println!("Records: {}", total);
    println!();
    for (tag, (count, bytes)) in &counts {
        let name = NodeType::from_tag(*tag).map_or("Unknown", NodeType::name);
        println!("  {:<12} {:>6} records {:>10} payload bytes", name, count, bytes);
    }
    Ok(())
}

fn cmd_dump(path: &str) -> tesm::Result<()> {
    info!("Opening archive: {}", path);
    let archive = IArchive::open(path)?;

    for record in archive.records() {
        let record = record?;
        let label = record.node_type().map_or("Unknown", NodeType::name);
        let detail = match record.decode() {
            Ok(Node::Root) => String::new(),
            Ok(Node::Transform(t)) => format!("{:?}", t.matrix),
            Ok(Node::VertexArray(va)) => format!(
                "'{}' x{} {} vertices ({} floats)",
                va.name(),
                va.components_per_vertex(),
                va.vertex_count(),
                va.element_count()
            ),
            Ok(Node::IndexArray(ia)) => format!(
                "{} faces of {} ({} indices)",
                ia.face_count(),
                ia.vertices_per_face(),
                ia.element_count()
            ),
            Ok(Node::Material(m)) => format!("'{}'", m.name),
            Err(e) => format!("<{}>", e),
        };
        println!(
            "{:>10}  {:<12} {:>8}  {}",
            record.offset, label, record.header.payload_size, detail
        );
    }
    Ok(())
}

fn cmd_export(input: &str, output: &str) -> tesm::Result<()> {
    info!("Loading scene description: {}", input);
    let desc = SceneDescription::load(input)?;
    debug!(
        objects = desc.scene.len(),
        meshes = desc.meshes.len(),
        "scene loaded"
    );

    let stats = export_scene(output, &desc.scene, &desc.meshes, &desc.options)?;
    println!(
        "Exported {} objects, {} records, {} bytes",
        stats.objects, stats.nodes, stats.bytes
    );
    if stats.input_vertices > 0 {
        println!(
            "Vertices: {} -> {} unique",
            stats.input_vertices, stats.unique_vertices
        );
    }
    Ok(())
}
