use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use overlay_anchor::{
    AnchorTracker, EditorEvent, GeometryProvider as _, OverlayDocument, OverlayEditor, Point,
    Position, Rect, RelativePosition, Size, StaticGeometry, Zone, to_pixels,
};

#[derive(Parser, Debug)]
#[command(name = "overlay-anchor", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the pixel placement of every stored element for a given layout.
    Place(PlaceArgs),
    /// Rewrite legacy pixel positions as relative positions.
    Migrate(MigrateArgs),
    /// Replay a scripted pointer session against a document.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct PlaceArgs {
    /// Input overlay document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Layout measurements JSON (container/text/media rectangles).
    #[arg(long)]
    geometry: PathBuf,

    /// Extra element ids to place at the default position, as `id` or `id=WxH`.
    /// A size sets the element's width fraction, which decides its zone.
    #[arg(long = "element", value_parser = parse_element)]
    elements: Vec<(String, Option<Size>)>,
}

#[derive(Parser, Debug)]
struct MigrateArgs {
    /// Input overlay document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Layout measurements JSON the legacy pixels were authored against.
    #[arg(long)]
    geometry: PathBuf,

    /// Rendered element size as `id=WxH`; legacy entries without one are left alone.
    #[arg(long = "element", value_parser = parse_element)]
    elements: Vec<(String, Option<Size>)>,

    /// Output document path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input overlay document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Initial layout measurements JSON.
    #[arg(long)]
    geometry: PathBuf,

    /// Pointer script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Optional output path for the resulting document.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, serde::Deserialize)]
struct Script {
    events: Vec<ScriptEvent>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScriptEvent {
    Down {
        id: String,
        pointer: Point,
        element: Rect,
    },
    Move {
        pointer: Point,
    },
    Up {
        pointer: Point,
        #[serde(default)]
        at_ms: u64,
    },
    Layout {
        geometry: StaticGeometry,
    },
    Reset {
        id: String,
    },
}

#[derive(Debug, serde::Serialize)]
struct Placement {
    x: f64,
    y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    zone: Option<Zone>,
    legacy: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Place(args) => cmd_place(args),
        Command::Migrate(args) => cmd_migrate(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn parse_element(s: &str) -> Result<(String, Option<Size>), String> {
    let Some((id, dims)) = s.split_once('=') else {
        return Ok((s.to_string(), None));
    };
    if id.is_empty() {
        return Err(format!("element '{s}' has an empty id"));
    }
    let (w, h) = dims
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("element size '{dims}' must look like WxH"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width '{w}': {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height '{h}': {e}"))?;
    Ok((id.to_string(), Some(Size::new(w, h))))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}

fn read_doc(path: &Path) -> anyhow::Result<OverlayDocument> {
    let doc: OverlayDocument = read_json(path, "document")?;
    doc.validate()?;
    Ok(doc)
}

fn write_doc(doc: &OverlayDocument, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, doc.to_json_string_pretty()?)
        .with_context(|| format!("write document '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_place(args: PlaceArgs) -> anyhow::Result<()> {
    let doc = read_doc(&args.in_path)?;
    let geometry: StaticGeometry = read_json(&args.geometry, "geometry")?;
    let container = geometry
        .container_bounds()
        .context("geometry has no container")?;

    let mut tracker = AnchorTracker::new(doc.engine.default_media_left_fraction);
    tracker.measure_now(&geometry);
    let anchors = tracker.anchors();

    let mut ids: Vec<(String, Option<Size>)> = doc
        .elements
        .iter()
        .map(|(id, _)| (id.to_string(), None))
        .collect();
    ids.extend(args.elements);

    let mut out = BTreeMap::<String, Placement>::new();
    for (id, size) in ids {
        let position = match (doc.elements.get(&id), size) {
            (Some(stored), _) => *stored,
            (None, Some(size)) => {
                let d = doc.default_position;
                Position::Relative(RelativePosition::new(
                    d.horizontal_fraction,
                    d.vertical_offset,
                    size.width / container.width(),
                ))
            }
            (None, None) => Position::Relative(doc.default_position),
        };
        let p = to_pixels(&position, &anchors, container)
            .with_context(|| format!("place element '{id}'"))?;
        let zone = position
            .as_relative()
            .map(|rel| rel.zone(anchors.media_left_fraction));
        out.insert(
            id,
            Placement {
                x: p.x,
                y: p.y,
                zone,
                legacy: position.is_legacy(),
            },
        );
    }

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_migrate(args: MigrateArgs) -> anyhow::Result<()> {
    let mut doc = read_doc(&args.in_path)?;
    let geometry: StaticGeometry = read_json(&args.geometry, "geometry")?;
    let sizes: BTreeMap<String, Size> = args
        .elements
        .into_iter()
        .filter_map(|(id, size)| size.map(|s| (id, s)))
        .collect();

    let migrated = doc.migrate_legacy(&geometry, &sizes)?;
    eprintln!(
        "migrated {migrated} legacy position(s), {} remaining",
        doc.legacy_count()
    );
    write_doc(&doc, &args.out)
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let doc = read_doc(&args.in_path)?;
    let geometry: StaticGeometry = read_json(&args.geometry, "geometry")?;
    let script: Script = read_json(&args.script, "script")?;

    let mut editor = OverlayEditor::new(geometry, doc.engine)
        .with_default_position(doc.default_position)
        .with_positions(doc.elements.clone())
        .on_change(|id, pos| eprintln!("changed {id}: {pos:?}"));

    let t0 = Instant::now();
    for event in script.events {
        match event {
            ScriptEvent::Down {
                id,
                pointer,
                element,
            } => {
                editor.pointer_down(&id, pointer, element);
            }
            ScriptEvent::Move { pointer } => {
                editor.pointer_move(pointer);
            }
            ScriptEvent::Up { pointer, at_ms } => {
                let ev = editor.pointer_up(pointer, t0 + Duration::from_millis(at_ms));
                if ev != EditorEvent::None {
                    println!("{}", serde_json::to_string(&ev)?);
                }
            }
            ScriptEvent::Layout { geometry } => {
                *editor.geometry_mut() = geometry;
                editor.layout_changed();
                editor.animation_frame();
            }
            ScriptEvent::Reset { id } => {
                editor.reset_position(&id);
            }
        }
    }

    let result = OverlayDocument {
        elements: editor.into_positions(),
        ..doc
    };
    match args.out {
        Some(out) => write_doc(&result, &out),
        None => {
            println!("{}", result.to_json_string_pretty()?);
            Ok(())
        }
    }
}
