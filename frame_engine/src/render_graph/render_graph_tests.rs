/// Tests for render graph resolution
///
/// Programs are declared directly in a ResourceManager; textures are real
/// 2D textures so log messages can name them.

use super::*;
use std::sync::Mutex;
use crate::log::{LogEntry, LogSeverity, NullLogger};
use crate::resource::{Program, ProgramDesc, Texture, TextureDesc};

// ============================================================================
// Helper Functions
// ============================================================================

struct CaptureLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn texture(rm: &mut ResourceManager, name: &str) -> EntityId {
    let id = rm.add_texture(Texture::from_desc(TextureDesc::new_2d(name, 4, 4)).unwrap());
    rm.register_name(id, name).unwrap();
    id
}

fn program(rm: &mut ResourceManager, name: &str, inputs: &[EntityId], outputs: &[EntityId]) -> EntityId {
    let id = rm.add_program(Program::from_desc(ProgramDesc {
        name: name.to_string(),
        inputs: inputs.to_vec(),
        outputs: outputs.to_vec(),
        ..Default::default()
    }).unwrap());
    rm.register_name(id, name).unwrap();
    id
}

fn build(rm: &ResourceManager, output: EntityId) -> Result<RenderGraph> {
    RenderGraph::build(rm, output, &NullLogger)
}

/// Every producer of every input sits strictly before its consumer
fn assert_topological(rm: &ResourceManager, graph: &RenderGraph) {
    for (index, &program_id) in graph.passes().iter().enumerate() {
        for &input in rm.program(program_id).unwrap().inputs() {
            let producer = find_producer(rm, input).unwrap();
            let producer_index = graph.position(producer).unwrap();
            assert!(producer_index < index, "producer of input must come first");
        }
    }
}

// ============================================================================
// Tests: find_producer
// ============================================================================

#[test]
fn test_find_producer() {
    let mut rm = ResourceManager::new();
    let t1 = texture(&mut rm, "t1");
    let t2 = texture(&mut rm, "t2");
    let p = program(&mut rm, "p", &[], &[t1, t2]);
    assert_eq!(find_producer(&rm, t2).unwrap(), p);
}

#[test]
fn test_find_producer_ambiguous_and_missing() {
    let mut rm = ResourceManager::new();
    let t5 = texture(&mut rm, "t5");
    let t9 = texture(&mut rm, "t9");
    program(&mut rm, "a", &[], &[t5]);
    program(&mut rm, "b", &[], &[t5]);

    assert!(matches!(find_producer(&rm, t5), Err(Error::AmbiguousProducer(_))));
    assert!(matches!(find_producer(&rm, t9), Err(Error::NoProducer(_))));
}

// ============================================================================
// Tests: build
// ============================================================================

#[test]
fn test_two_program_chain() {
    let mut rm = ResourceManager::new();
    let t1 = texture(&mut rm, "t1");
    let t2 = texture(&mut rm, "t2");
    let p1 = program(&mut rm, "p1", &[], &[t1]);
    let p2 = program(&mut rm, "p2", &[t1], &[t2]);

    let graph = build(&rm, t2).unwrap();
    assert_eq!(graph.passes(), &[p1, p2]);
    assert_eq!(graph.output_texture(), t2);
}

#[test]
fn test_chain_registered_consumer_first() {
    let mut rm = ResourceManager::new();
    let t1 = texture(&mut rm, "t1");
    let t2 = texture(&mut rm, "t2");
    let t3 = texture(&mut rm, "t3");
    let p3 = program(&mut rm, "p3", &[t2], &[t3]);
    let p2 = program(&mut rm, "p2", &[t1], &[t2]);
    let p1 = program(&mut rm, "p1", &[], &[t1]);

    let graph = build(&rm, t3).unwrap();
    assert_eq!(graph.passes(), &[p1, p2, p3]);
}

#[test]
fn test_duplicate_output_is_ambiguous() {
    let mut rm = ResourceManager::new();
    let t5 = texture(&mut rm, "t5");
    program(&mut rm, "a", &[], &[t5]);
    program(&mut rm, "b", &[], &[t5]);
    assert!(matches!(build(&rm, t5), Err(Error::AmbiguousProducer(_))));
}

#[test]
fn test_duplicate_output_elsewhere_still_fails() {
    let mut rm = ResourceManager::new();
    let t1 = texture(&mut rm, "t1");
    let other = texture(&mut rm, "other");
    program(&mut rm, "p1", &[], &[t1]);
    program(&mut rm, "x", &[], &[other]);
    program(&mut rm, "y", &[], &[other]);
    assert!(matches!(build(&rm, t1), Err(Error::AmbiguousProducer(_))));
}

#[test]
fn test_unknown_output_is_no_producer() {
    let mut rm = ResourceManager::new();
    let t1 = texture(&mut rm, "t1");
    let t9 = texture(&mut rm, "t9");
    program(&mut rm, "p1", &[], &[t1]);
    assert!(matches!(build(&rm, t9), Err(Error::NoProducer(_))));
}

#[test]
fn test_missing_input_producer_is_no_producer() {
    let mut rm = ResourceManager::new();
    let t1 = texture(&mut rm, "t1");
    let orphan = texture(&mut rm, "orphan");
    let out = texture(&mut rm, "out");
    program(&mut rm, "p1", &[], &[t1]);
    program(&mut rm, "p2", &[t1, orphan], &[out]);
    assert!(matches!(build(&rm, out), Err(Error::NoProducer(_))));
}

#[test]
fn test_zero_inputs_single_pass() {
    let mut rm = ResourceManager::new();
    let t = texture(&mut rm, "t");
    let p = program(&mut rm, "p", &[], &[t]);
    let graph = build(&rm, t).unwrap();
    assert_eq!(graph.passes(), &[p]);
    assert_eq!(graph.len(), 1);
}

#[test]
fn test_shared_producer_appears_once() {
    // a → (b, c) → d
    let mut rm = ResourceManager::new();
    let ta = texture(&mut rm, "ta");
    let tb = texture(&mut rm, "tb");
    let tc = texture(&mut rm, "tc");
    let td = texture(&mut rm, "td");
    let d = program(&mut rm, "d", &[tb, tc], &[td]);
    let c = program(&mut rm, "c", &[ta], &[tc]);
    let b = program(&mut rm, "b", &[ta], &[tb]);
    let a = program(&mut rm, "a", &[], &[ta]);

    let graph = build(&rm, td).unwrap();
    assert_eq!(graph.passes(), &[a, c, b, d]);
    for id in [a, b, c, d] {
        assert_eq!(graph.passes().iter().filter(|&&p| p == id).count(), 1);
    }
    assert_topological(&rm, &graph);
}

#[test]
fn test_multi_output_producer_resolved_once() {
    let mut rm = ResourceManager::new();
    let albedo = texture(&mut rm, "albedo");
    let normal = texture(&mut rm, "normal");
    let out = texture(&mut rm, "out");
    let gbuffer = program(&mut rm, "gbuffer", &[], &[albedo, normal]);
    let light = program(&mut rm, "light", &[normal, albedo, albedo], &[out]);

    let graph = build(&rm, out).unwrap();
    assert_eq!(graph.passes(), &[gbuffer, light]);
}

#[test]
fn test_unused_programs_are_left_out() {
    let mut rm = ResourceManager::new();
    let t1 = texture(&mut rm, "t1");
    let unused = texture(&mut rm, "unused");
    let p1 = program(&mut rm, "p1", &[], &[t1]);
    let extra = program(&mut rm, "extra", &[], &[unused]);

    let graph = build(&rm, t1).unwrap();
    assert!(graph.contains(p1));
    assert!(!graph.contains(extra));
}

#[test]
fn test_cycle_is_configuration_error() {
    let mut rm = ResourceManager::new();
    let ta = texture(&mut rm, "ta");
    let tb = texture(&mut rm, "tb");
    let out = texture(&mut rm, "out");
    program(&mut rm, "a", &[tb], &[ta]);
    program(&mut rm, "b", &[ta], &[tb]);
    program(&mut rm, "final", &[ta], &[out]);
    assert!(matches!(build(&rm, out), Err(Error::ConfigurationError(_))));
}

#[test]
fn test_self_dependency_is_configuration_error() {
    let mut rm = ResourceManager::new();
    let t = texture(&mut rm, "t");
    program(&mut rm, "feedback", &[t], &[t]);
    assert!(matches!(build(&rm, t), Err(Error::ConfigurationError(_))));
}

#[test]
fn test_deep_chain_is_topological() {
    let mut rm = ResourceManager::new();
    let textures: Vec<EntityId> = (0..8).map(|i| texture(&mut rm, &format!("t{}", i))).collect();
    // Register in a scrambled order
    for i in [5usize, 2, 7, 0, 3, 6, 1, 4] {
        let inputs: Vec<EntityId> = if i == 0 { vec![] } else { vec![textures[i - 1], textures[0]] };
        program(&mut rm, &format!("p{}", i), &inputs, &[textures[i]]);
    }

    let graph = build(&rm, textures[7]).unwrap();
    assert_eq!(graph.len(), 8);
    assert_topological(&rm, &graph);
}

// ============================================================================
// Tests: Logging
// ============================================================================

#[test]
fn test_build_logs_order_and_errors() {
    let logger = CaptureLogger { entries: Mutex::new(Vec::new()) };
    let mut rm = ResourceManager::new();
    let t1 = texture(&mut rm, "t1");
    let t9 = texture(&mut rm, "t9");
    program(&mut rm, "p1", &[], &[t1]);

    RenderGraph::build(&rm, t1, &logger).unwrap();
    let _ = RenderGraph::build(&rm, t9, &logger);

    let entries = logger.entries.lock().unwrap();
    assert!(entries.iter().any(|e| e.severity == LogSeverity::Info && e.message.contains("p1")));
    let error = entries.iter().find(|e| e.severity == LogSeverity::Error).unwrap();
    assert_eq!(error.source, "frame::RenderGraph");
    assert!(error.message.contains("t9"));
    assert!(error.file.is_some());
}
