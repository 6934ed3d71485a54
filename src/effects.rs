//! Pop overlays
//!
//! Short-lived HTML elements layered over the canvas when a bubble pops: a
//! glow ripple at the tap point and a floating "Pop!"/"+N" label. They are
//! built here as plain data; the browser glue creates the element, applies
//! the styles and removes it after `lifetime_ms`. Stylesheet classes do the
//! animation.

use glam::Vec2;

use crate::sim::{Color, PopEvent};

/// Ripple div lifetime (ms)
pub const RIPPLE_MS: i32 = 600;
/// Ripple div edge length (px)
pub const RIPPLE_SIZE: f32 = 100.0;
/// Floating label lifetime (ms)
pub const POP_TEXT_MS: i32 = 800;
/// How long the combo counter stays pulsed (ms)
pub const COMBO_PULSE_MS: i32 = 100;
/// Class toggled on the combo counter for a pulse
pub const COMBO_PULSE_CLASS: &str = "pulse";

/// One overlay element
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub class: &'static str,
    pub text: Option<String>,
    /// Inline CSS properties
    pub styles: Vec<(&'static str, String)>,
    pub lifetime_ms: i32,
}

impl Overlay {
    /// Glow ripple centred by the stylesheet on the tap point
    pub fn ripple(at: Vec2, event: &PopEvent) -> Self {
        let size = px(RIPPLE_SIZE);
        Self {
            class: "ripple",
            text: None,
            styles: vec![
                ("left", px(at.x)),
                ("top", px(at.y)),
                ("width", size.clone()),
                ("height", size),
                (
                    "background",
                    format!(
                        "radial-gradient(circle, {} 0%, transparent 70%)",
                        css_color(event.color.glow)
                    ),
                ),
            ],
            lifetime_ms: RIPPLE_MS,
        }
    }

    /// Floating label over the popped bubble
    pub fn pop_text(event: &PopEvent) -> Self {
        Self {
            class: "pop-text",
            text: Some(event.label()),
            styles: vec![
                ("left", px(event.pos.x)),
                ("top", px(event.pos.y)),
                ("color", css_color(event.color.main)),
            ],
            lifetime_ms: POP_TEXT_MS,
        }
    }

    /// Both overlays for a pop at `tap`, ripple underneath
    pub fn for_pop(tap: Vec2, event: &PopEvent) -> [Self; 2] {
        [Self::ripple(tap, event), Self::pop_text(event)]
    }
}

fn px(v: f32) -> String {
    format!("{v}px")
}

/// CSS `rgba()` for a [0, 1] color
pub fn css_color(c: Color) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(c[0]),
        channel(c[1]),
        channel(c[2]),
        c[3]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PALETTE;

    fn event(combo: u32) -> PopEvent {
        PopEvent {
            bubble_id: 7,
            pos: Vec2::new(120.0, 80.0),
            radius: 40.0,
            color: PALETTE[0],
            combo,
            pop_count: 3,
            new_best: false,
        }
    }

    fn style<'a>(overlay: &'a Overlay, name: &str) -> Option<&'a str> {
        overlay
            .styles
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color([1.0, 0.0, 0.5, 0.5]), "rgba(255, 0, 128, 0.5)");
        assert_eq!(css_color([2.0, -1.0, 0.0, 1.0]), "rgba(255, 0, 0, 1)");
    }

    #[test]
    fn test_ripple_sits_on_tap_point() {
        let ripple = Overlay::ripple(Vec2::new(130.5, 90.0), &event(2));
        assert_eq!(ripple.class, "ripple");
        assert_eq!(ripple.lifetime_ms, 600);
        assert_eq!(style(&ripple, "left"), Some("130.5px"));
        assert_eq!(style(&ripple, "top"), Some("90px"));
        assert_eq!(style(&ripple, "width"), Some("100px"));
        let background = style(&ripple, "background").unwrap();
        assert!(background.starts_with("radial-gradient(circle, rgba(244, 114, 182, 0.5) 0%"));
        assert!(ripple.text.is_none());
    }

    #[test]
    fn test_pop_text_uses_bubble_position_and_label() {
        let text = Overlay::pop_text(&event(3));
        assert_eq!(text.text.as_deref(), Some("+3"));
        assert_eq!(text.lifetime_ms, 800);
        assert_eq!(style(&text, "left"), Some("120px"));
        assert_eq!(style(&text, "color"), Some("rgba(244, 114, 182, 1)"));
        assert_eq!(Overlay::pop_text(&event(1)).text.as_deref(), Some("Pop!"));
    }

    #[test]
    fn test_for_pop_orders_ripple_first() {
        let [ripple, text] = Overlay::for_pop(Vec2::new(1.0, 2.0), &event(2));
        assert_eq!(ripple.class, "ripple");
        assert_eq!(text.class, "pop-text");
    }
}
