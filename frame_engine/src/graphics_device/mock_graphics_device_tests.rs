use super::*;
use slotmap::KeyData;

fn id(n: u64) -> EntityId {
    EntityId::from(KeyData::from_ffi(n))
}

// ============================================================================
// Recording tests
// ============================================================================

#[test]
fn test_records_calls_in_order() {
    let mut device = MockGraphicsDevice::new();
    device.bind_frame_target().unwrap();
    device.clear(ClearFlags::COLOR | ClearFlags::DEPTH, [0.0; 4]).unwrap();
    device.use_program(id(1)).unwrap();
    device.draw_indexed(6).unwrap();
    device.unuse_program().unwrap();

    assert_eq!(device.commands(), &[
        DeviceCommand::BindFrameTarget,
        DeviceCommand::Clear { flags: ClearFlags::all(), color: [0.0; 4] },
        DeviceCommand::UseProgram(id(1)),
        DeviceCommand::DrawIndexed(6),
        DeviceCommand::UnuseProgram,
    ]);
    assert_eq!(device.draw_count(), 1);
}

#[test]
fn test_last_uniform_returns_latest_value() {
    let mut device = MockGraphicsDevice::new();
    device.set_uniform("time_s", &UniformValue::Float(1.0)).unwrap();
    device.set_uniform("other", &UniformValue::Int(3)).unwrap();
    device.set_uniform("time_s", &UniformValue::Float(2.0)).unwrap();

    assert_eq!(device.last_uniform("time_s"), Some(UniformValue::Float(2.0)));
    assert_eq!(device.last_uniform("missing"), None);
}

#[test]
fn test_clear_commands() {
    let mut device = MockGraphicsDevice::new();
    device.set_depth_test(true).unwrap();
    device.clear_commands();
    assert!(device.commands().is_empty());
}

// ============================================================================
// Failure injection tests
// ============================================================================

#[test]
fn test_failing_draws_return_backend_error() {
    let mut device = MockGraphicsDevice::new().with_failing_draws();
    assert!(matches!(device.draw_indexed(3), Err(Error::BackendError(_))));
    assert_eq!(device.draw_count(), 0);

    device.set_fail_draws(false);
    assert!(device.draw_indexed(3).is_ok());
}

#[test]
fn test_viewport_full() {
    assert_eq!(Viewport::full((64, 32)), Viewport { x: 0, y: 0, width: 64, height: 32 });
}
