use std::fs;

use anyhow::{Context, Result, bail};
use eframe::egui::{Vec2, vec2};
use serde::{Deserialize, Serialize};

use crate::graph::{GraphStore, Vertex};

use super::{EditorState, Mode, SelectionSet};

pub const SESSION_VERSION: u32 = 1;

#[derive(Deserialize, Serialize)]
struct SessionBlock {
    version: u32,
    mode: Mode,
    simulate: bool,
    vertices: Vec<SessionVertex>,
    edges: Vec<(usize, usize)>,
    selected_vertices: Vec<usize>,
    selected_edges: Vec<usize>,
}

#[derive(Deserialize, Serialize)]
struct SessionVertex {
    position: [f32; 2],
    velocity: [f32; 2],
    label: Option<String>,
}

#[derive(Deserialize)]
struct VersionProbe {
    #[serde(default)]
    version: u32,
}

pub fn write_block(state: &EditorState) -> Result<Vec<u8>> {
    let block = SessionBlock {
        version: SESSION_VERSION,
        mode: state.mode,
        simulate: state.simulate,
        vertices: state
            .graph
            .vertices
            .iter()
            .map(|vertex| SessionVertex {
                position: [vertex.position.x, vertex.position.y],
                velocity: [vertex.velocity.x, vertex.velocity.y],
                label: vertex.label.clone(),
            })
            .collect(),
        edges: state.graph.edges.clone(),
        selected_vertices: state.selected_vertices.as_slice().to_vec(),
        selected_edges: state.selected_edges.as_slice().to_vec(),
    };

    serde_json::to_vec(&block).context("failed to encode session block")
}

pub fn read_block(bytes: &[u8]) -> Result<EditorState> {
    let probe: VersionProbe = serde_json::from_slice(bytes).context("invalid session block")?;
    if probe.version != SESSION_VERSION {
        bail!(
            "unsupported session block version {} (expected {SESSION_VERSION})",
            probe.version
        );
    }

    let block: SessionBlock = serde_json::from_slice(bytes).context("invalid session block")?;

    let vertex_count = block.vertices.len();
    for &(from, to) in &block.edges {
        if from >= vertex_count || to >= vertex_count {
            bail!("session edge ({from}, {to}) references a vertex outside 0..{vertex_count}");
        }
    }

    let selected_vertices = restore_selection(block.selected_vertices, vertex_count, "vertex")?;
    let selected_edges = restore_selection(block.selected_edges, block.edges.len(), "edge")?;

    let vertices = block
        .vertices
        .into_iter()
        .map(|vertex| Vertex {
            position: vec2(vertex.position[0], vertex.position[1]),
            velocity: vec2(vertex.velocity[0], vertex.velocity[1]),
            acceleration: Vec2::ZERO,
            label: vertex.label,
        })
        .collect();

    Ok(EditorState {
        graph: GraphStore {
            vertices,
            edges: block.edges,
        },
        selected_vertices,
        selected_edges,
        mode: block.mode,
        simulate: block.simulate,
        ..EditorState::default()
    })
}

fn restore_selection(mut indices: Vec<usize>, limit: usize, what: &str) -> Result<SelectionSet> {
    indices.sort_unstable();
    indices.dedup();
    if let Some(&last) = indices.last()
        && last >= limit
    {
        bail!("session {what} selection references index {last} outside 0..{limit}");
    }

    let mut set = SelectionSet::default();
    set.assign(indices);
    Ok(set)
}

pub fn save_session_file(path: &str, state: &EditorState) -> Result<()> {
    let bytes = write_block(state)?;
    fs::write(path, bytes).with_context(|| format!("failed to write {path}"))
}

pub fn load_session_file(path: &str) -> Result<EditorState> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {path}"))?;
    read_block(&bytes).with_context(|| format!("failed to restore session from {path}"))
}

#[cfg(test)]
mod tests {
    use super::super::Drag;
    use super::*;

    #[test]
    fn session_block_round_trips() {
        let mut editor = EditorState::default();
        let hub = editor.graph.add_vertex(vec2(5.0, -3.0));
        editor.graph.vertices[hub].velocity = vec2(0.5, 0.25);
        editor.graph.vertices[hub].label = Some("hub".to_owned());
        editor.graph.add_vertex(vec2(40.0, 12.0));
        editor.graph.edges.push((0, 1));
        editor.selected_vertices.assign(vec![1]);
        editor.mode = Mode::EdgeCreate;
        editor.simulate = true;
        editor.drag = Drag::RubberBand {
            start: vec2(1.0, 1.0),
        };

        let block = write_block(&editor).unwrap();
        let restored = read_block(&block).unwrap();

        assert_eq!(restored.graph.vertices, editor.graph.vertices);
        assert_eq!(restored.graph.edges, [(0, 1)]);
        assert_eq!(restored.selected_vertices.as_slice(), [1]);
        assert!(restored.selected_edges.is_empty());
        assert_eq!(restored.mode, Mode::EdgeCreate);
        assert!(restored.simulate);
        assert_eq!(restored.drag, Drag::Idle);
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let raw = serde_json::json!({ "version": 99 }).to_string();
        assert!(read_block(raw.as_bytes()).is_err());
    }

    #[test]
    fn corrupt_blocks_are_rejected() {
        assert!(read_block(b"not a session").is_err());
        assert!(read_block(br#"{"version": 1}"#).is_err());
    }

    #[test]
    fn out_of_range_references_are_rejected() {
        let raw = serde_json::json!({
            "version": 1,
            "mode": "Move",
            "simulate": false,
            "vertices": [{ "position": [0.0, 0.0], "velocity": [0.0, 0.0], "label": null }],
            "edges": [[0, 1]],
            "selected_vertices": [],
            "selected_edges": [],
        })
        .to_string();
        assert!(read_block(raw.as_bytes()).is_err());

        let raw = serde_json::json!({
            "version": 1,
            "mode": "Move",
            "simulate": false,
            "vertices": [{ "position": [0.0, 0.0], "velocity": [0.0, 0.0], "label": null }],
            "edges": [],
            "selected_vertices": [3],
            "selected_edges": [],
        })
        .to_string();
        assert!(read_block(raw.as_bytes()).is_err());
    }
}
