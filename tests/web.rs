#![cfg(target_arch = "wasm32")]

use lanyard_engine::Badge;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn badge_exposes_ribbon_buffers() {
    let mut badge = Badge::new();
    badge.frame(0.1);
    let layout = badge.ribbon_layout();
    assert_eq!(layout.positions_len(), 212 * 3);
    assert_eq!(layout.indices_len(), 1248);
    assert!(layout.positions_ptr() != 0);
    assert_eq!(badge.card_matrix().len(), 16);
}

#[wasm_bindgen_test]
fn bad_config_maps_to_js_error() {
    assert!(Badge::from_config("{".to_string()).is_err());
    let mut badge = Badge::new();
    assert!(badge.set_config("{\"showGlitter\":true}".to_string()).is_ok());
    assert!(badge.glitter_visible());
    assert_eq!(badge.cursor_css(), "auto");
}
