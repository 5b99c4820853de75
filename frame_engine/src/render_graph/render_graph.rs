//! Render graph: the pass order of a frame.
//!
//! Programs are the nodes; an edge runs from the program writing a texture
//! to every program sampling it. Building a graph for an output texture
//! resolves, depth first, the producers of every input before the
//! consumer, so the resulting order is topological and contains each
//! program once.
//!
//! Candidate producers are always enumerated in program registration
//! order, which makes the order reproducible.

use rustc_hash::{FxHashMap, FxHashSet};
use crate::error::{Error, Result};
use crate::log::Logger;
use crate::resource::{EntityId, ResourceManager};
use crate::{engine_debug, engine_error, engine_info};

const LOG_SOURCE: &str = "frame::RenderGraph";

/// Program writing `texture`
///
/// # Errors
///
/// - `AmbiguousProducer` if more than one program writes it
/// - `NoProducer` if none does
pub fn find_producer(resources: &ResourceManager, texture: EntityId) -> Result<EntityId> {
    let mut producers = resources
        .programs()
        .filter(|(_, program)| program.writes(texture))
        .map(|(id, _)| id);

    let producer = producers.next().ok_or_else(|| Error::NoProducer(format!(
        "no program outputs texture {}", resources.display_name(texture))))?;
    if let Some(other) = producers.next() {
        return Err(Error::AmbiguousProducer(format!(
            "texture {} is output of both {} and {}",
            resources.display_name(texture),
            resources.display_name(producer),
            resources.display_name(other))));
    }
    Ok(producer)
}

/// Check that no texture is written by two programs
pub fn check_unique_producers(resources: &ResourceManager) -> Result<()> {
    let mut producers: FxHashMap<EntityId, EntityId> = FxHashMap::default();
    for (program_id, program) in resources.programs() {
        for &output in program.outputs() {
            if let Some(&previous) = producers.get(&output) {
                return Err(Error::AmbiguousProducer(format!(
                    "texture {} is output of both {} and {}",
                    resources.display_name(output),
                    resources.display_name(previous),
                    resources.display_name(program_id))));
            }
            producers.insert(output, program_id);
        }
    }
    Ok(())
}

/// Resolved pass order for one output texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderGraph {
    output_texture: EntityId,
    passes: Vec<EntityId>,
}

impl RenderGraph {
    /// Resolve the programs needed to produce `output_texture`
    ///
    /// # Errors
    ///
    /// - `AmbiguousProducer` if any texture has two producers
    /// - `NoProducer` if the output or a needed input has no producer
    /// - `ConfigurationError` on a dependency cycle
    /// - `NotFound` if a program id is stale
    pub fn build(
        resources: &ResourceManager,
        output_texture: EntityId,
        logger: &dyn Logger,
    ) -> Result<Self> {
        let result = Self::resolve_all(resources, output_texture, logger);
        match &result {
            Ok(graph) => engine_info!(logger, LOG_SOURCE,
                "Render order for {}: {} pass(es) [{}]",
                resources.display_name(output_texture),
                graph.passes.len(),
                graph.passes.iter()
                    .map(|&id| resources.display_name(id))
                    .collect::<Vec<_>>()
                    .join(", ")),
            Err(err) => engine_error!(logger, LOG_SOURCE,
                "Cannot build render order for {}: {}",
                resources.display_name(output_texture), err),
        }
        result
    }

    fn resolve_all(
        resources: &ResourceManager,
        output_texture: EntityId,
        logger: &dyn Logger,
    ) -> Result<Self> {
        check_unique_producers(resources)?;
        let root = find_producer(resources, output_texture)?;

        let mut resolver = Resolver {
            resources,
            logger,
            placed: FxHashSet::default(),
            in_progress: FxHashSet::default(),
            order: Vec::new(),
        };
        resolver.resolve(root)?;

        Ok(Self { output_texture, passes: resolver.order })
    }

    /// Texture the graph was resolved for
    pub fn output_texture(&self) -> EntityId {
        self.output_texture
    }

    /// Program ids, producers first
    pub fn passes(&self) -> &[EntityId] {
        &self.passes
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn contains(&self, program: EntityId) -> bool {
        self.passes.contains(&program)
    }

    /// Position of `program` in the order
    pub fn position(&self, program: EntityId) -> Option<usize> {
        self.passes.iter().position(|&id| id == program)
    }
}

/// Depth-first resolution state
struct Resolver<'a> {
    resources: &'a ResourceManager,
    logger: &'a dyn Logger,
    placed: FxHashSet<EntityId>,
    in_progress: FxHashSet<EntityId>,
    order: Vec<EntityId>,
}

impl Resolver<'_> {
    fn resolve(&mut self, program_id: EntityId) -> Result<()> {
        let resources = self.resources;
        if self.placed.contains(&program_id) {
            return Ok(());
        }
        if !self.in_progress.insert(program_id) {
            return Err(Error::ConfigurationError(format!(
                "dependency cycle through program {}", resources.display_name(program_id))));
        }

        let program = resources.program(program_id)?;
        let mut needed = program.inputs().to_vec();
        needed.sort();
        needed.dedup();

        if let Some(&own) = needed.iter().find(|&&texture| program.writes(texture)) {
            return Err(Error::ConfigurationError(format!(
                "program {} samples its own output {}",
                resources.display_name(program_id),
                resources.display_name(own))));
        }

        for &candidate_id in resources.program_ids() {
            if needed.is_empty() {
                break;
            }
            if candidate_id == program_id {
                continue;
            }
            let candidate = resources.program(candidate_id)?;
            if candidate.outputs().iter().any(|output| needed.binary_search(output).is_ok()) {
                self.resolve(candidate_id)?;
                needed.retain(|&texture| !candidate.writes(texture));
            }
        }

        if let Some(&missing) = needed.first() {
            return Err(Error::NoProducer(format!(
                "no program outputs texture {} needed by {}",
                resources.display_name(missing),
                resources.display_name(program_id))));
        }

        self.in_progress.remove(&program_id);
        self.placed.insert(program_id);
        self.order.push(program_id);
        engine_debug!(self.logger, LOG_SOURCE,
            "Pass {}: {}", self.order.len() - 1, resources.display_name(program_id));
        Ok(())
    }
}

#[cfg(test)]
#[path = "render_graph_tests.rs"]
mod tests;
