use anyhow::{anyhow, Context, Result};
use kestrel_scene::assets::AssetCatalog;
use kestrel_scene::config::SceneConfig;
use kestrel_scene::editor::{ElementId, SceneContext, SceneElement, SceneTree};
use kestrel_scene::render::MasterRenderScene;
use kestrel_scene::scene::SceneDocument;
use std::collections::BTreeMap;
use std::env;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("error: {err:?}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = Vec::new();
    let mut config_path = None;
    let mut raw = env::args().skip(1);
    while let Some(arg) = raw.next() {
        if arg == "--config" {
            config_path = Some(raw.next().ok_or_else(|| anyhow!("--config requires a path"))?);
        } else {
            args.push(arg);
        }
    }
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        print_usage();
        return Ok(());
    };
    let ctx = || scene_context(config_path.as_deref());
    match command.as_str() {
        "validate" => {
            let scene_path = args
                .next()
                .ok_or_else(|| anyhow!("validate requires a path: scene_tool validate <scene>"))?;
            cmd_validate(&ctx()?, &scene_path)
        }
        "list" => {
            let scene_path =
                args.next().ok_or_else(|| anyhow!("list requires a path: scene_tool list <scene>"))?;
            cmd_list(&ctx()?, &scene_path)
        }
        "normalize" => {
            let input = args
                .next()
                .ok_or_else(|| anyhow!("normalize requires input path: scene_tool normalize <in> <out>"))?;
            let output = args
                .next()
                .ok_or_else(|| anyhow!("normalize requires output path: scene_tool normalize <in> <out>"))?;
            cmd_normalize(&ctx()?, &input, &output)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(anyhow!("unknown command '{other}'")),
    }
}

fn print_usage() {
    eprintln!(
        "Scene Tool

Usage:
  scene_tool validate <scene_path>     Load every element and report counts per type
  scene_tool list <scene_path>         Print the element hierarchy
  scene_tool normalize <input> <output>  Load and re-save a scene with derived fields dropped
  scene_tool help                      Show this message

Options:
  --config <path>                      Scene config (indicator standoff, hidden mode, meshes)
"
    );
}

fn scene_context(config_path: Option<&str>) -> Result<SceneContext> {
    let config = match config_path {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    Ok(SceneContext::new(AssetCatalog::new(), config))
}

fn cmd_validate(ctx: &SceneContext, scene_path: &str) -> Result<()> {
    let document = SceneDocument::load_from_path(scene_path)?;
    let mut render_scene = MasterRenderScene::new();
    let tree = SceneTree::from_document(ctx, &document, &mut render_scene)
        .with_context(|| format!("Scene '{scene_path}' failed validation"))?;

    let mut per_type: BTreeMap<&str, usize> = BTreeMap::new();
    let mut names: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, element) in tree.iter() {
        *per_type.entry(element.element_type_name()).or_default() += 1;
        *names.entry(element.name()).or_default() += 1;
    }
    let summary = per_type.iter().map(|(kind, count)| format!("{kind}: {count}")).collect::<Vec<_>>().join("  ");
    println!("Scene '{}' is valid. Elements: {}. {}", scene_path, tree.len(), summary);
    for (name, count) in names.iter().filter(|(_, count)| **count > 1) {
        println!("  note: name '{name}' is used by {count} elements");
    }
    Ok(())
}

fn cmd_list(ctx: &SceneContext, scene_path: &str) -> Result<()> {
    let mut render_scene = MasterRenderScene::new();
    let tree = SceneTree::load_from_path(ctx, scene_path, &mut render_scene)?;
    println!("Scene '{}' ({} elements)", scene_path, tree.len());
    for root in tree.roots() {
        print_subtree(&tree, *root, 1);
    }
    Ok(())
}

fn print_subtree(tree: &SceneTree, id: ElementId, depth: usize) {
    let Some(element) = tree.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    let detail = match element {
        SceneElement::DirectionalLight(light) => format!(
            " elevation={:.1} azimuth={:.1}{}",
            light.elevation(),
            light.azimuth(),
            if light.visible() { "" } else { " hidden" }
        ),
        SceneElement::PointLight(light) => {
            format!(" position={}{}", light.position(), if light.visible() { "" } else { " hidden" })
        }
        SceneElement::Group(_) => String::new(),
    };
    println!("{indent}- {} [{}]{detail}", element.name(), element.element_type_name());
    for child in tree.children(id) {
        print_subtree(tree, *child, depth + 1);
    }
}

fn cmd_normalize(ctx: &SceneContext, input: &str, output: &str) -> Result<()> {
    let mut render_scene = MasterRenderScene::new();
    let tree = SceneTree::load_from_path(ctx, input, &mut render_scene)?;
    tree.save_to_path(output)?;
    println!("Normalized '{}' -> '{}' ({} elements)", input, output, tree.len());
    Ok(())
}
