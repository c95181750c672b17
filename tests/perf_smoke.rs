use lanyard_engine::Badge;

#[test]
fn perf_smoke_frame() {
    let mut badge = Badge::new();
    badge.enable_perf_metrics(true);
    badge.set_viewport(1280.0, 720.0);
    for _ in 0..30 {
        badge.frame(1.0 / 60.0);
    }
    let stats = badge.get_perf_stats();
    assert!(stats.frame_ms() >= 0.0);
    assert!(stats.mesh_ms() >= 0.0);
    assert_eq!(stats.vertices(), 212);
}
