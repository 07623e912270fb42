use std::fs;

use anyhow::{Context, Result, bail};
use eframe::egui::{Vec2, vec2};
use serde::{Deserialize, Serialize};

use super::{GraphStore, Vertex};

const SPIRAL_SPACING: f32 = 20.0;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GraphFile {
    #[serde(default)]
    pub vertices: Vec<String>,
    #[serde(default)]
    pub edges: Vec<(usize, usize)>,
}

pub fn parse_graph_file(raw: &str) -> Result<GraphFile> {
    serde_json::from_str(raw).context("invalid graph JSON")
}

pub fn load_graph_file(path: &str) -> Result<GraphFile> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    parse_graph_file(&raw).with_context(|| format!("failed to parse {path}"))
}

pub fn save_graph_file(path: &str, file: &GraphFile) -> Result<()> {
    let raw = serde_json::to_string_pretty(file).context("failed to encode graph JSON")?;
    fs::write(path, raw).with_context(|| format!("failed to write {path}"))
}

pub fn spiral_position(index: usize) -> Vec2 {
    let turn = index as f32 + 0.5;
    let radius = SPIRAL_SPACING * turn.sqrt();
    let angle = turn * std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    vec2(radius * angle.cos(), radius * angle.sin())
}

pub fn build_store(file: &GraphFile) -> Result<GraphStore> {
    for &(from, to) in &file.edges {
        if from >= file.vertices.len() || to >= file.vertices.len() {
            bail!(
                "edge ({from}, {to}) references a vertex outside 0..{}",
                file.vertices.len()
            );
        }
    }

    let vertices = file
        .vertices
        .iter()
        .enumerate()
        .map(|(index, label)| Vertex {
            label: Some(label.clone()).filter(|label| !label.is_empty()),
            ..Vertex::at(spiral_position(index))
        })
        .collect();

    Ok(GraphStore {
        vertices,
        edges: file.edges.clone(),
    })
}
