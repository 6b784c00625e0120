//! Geometry and inline-style values for every decorative effect.
//!
//! Nothing here touches the DOM; the frontend feeds in measurements and writes
//! the returned strings back as styles.

use std::f64::consts::PI;

pub const SHAPE_CLASS: &str = "shape";
pub const SHAPE_CONTAINER_SELECTOR: &str = ".floating-shapes";
pub const HOME_PAGE_CLASS: &str = "home-page";
pub const DYNAMIC_SHAPE_CLASSES: &str = "shape dynamic-shape parallax-shape";

pub const REVEAL_TARGETS: &str = ".glass-card, .contact-item, .skill-item, .social-link";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const REVEAL_HIDDEN_TRANSFORM: &str = "translateY(50px) scale(0.8)";
pub const REVEAL_SHOWN_TRANSFORM: &str = "translateY(0) scale(1)";
pub const REVEAL_TRANSITION: &str = "opacity 0.8s ease, transform 0.8s ease";
pub const BOUNCE_IN_CLASS: &str = "bounce-in";
pub const BOUNCE_IN_STYLE: &str = ".bounce-in { animation: bounceInUp 0.8s ease-out !important; }";

pub const BOUNCE_TARGETS: &str = ".glass-card, .contact-item, .skill-item";
pub const BACKGROUND_SELECTOR: &str = ".bg-animation";
const BACKGROUND_SCROLL_FACTOR: f64 = 0.3;
const BOUNCE_OFFSET_PX: f64 = 10.0;
const BOUNCE_SCALE_AMPLITUDE: f64 = 0.05;

pub const RIPPLE_TARGETS: &str = ".social-link, .contact-item, .skill-item";
pub const RIPPLE_STYLE_ID: &str = "ripple-styles";
pub const RIPPLE_KEYFRAMES: &str =
    "@keyframes ripple { to { transform: scale(4); opacity: 0; } }";

pub const TOOLTIP_TARGETS: &str = ".social-link[data-tooltip]";
pub const TOOLTIP_ATTRIBUTE: &str = "data-tooltip";
pub const TOOLTIP_CLASS: &str = "tooltip";
pub const TOOLTIP_CSS: &str = "position: absolute; background: rgba(0, 0, 0, 0.8); color: white; \
padding: 8px 12px; border-radius: 6px; font-size: 12px; font-weight: 500; white-space: nowrap; \
opacity: 0; pointer-events: none; transition: opacity 0.3s ease; z-index: 1000; bottom: 100%; \
left: 50%; transform: translateX(-50%); margin-bottom: 8px;";

pub const CURSOR_CLASS: &str = "custom-cursor";
pub const CURSOR_CSS: &str = "position: fixed; width: 20px; height: 20px; \
background: linear-gradient(135deg, #007AFF, #AF52DE); border-radius: 50%; pointer-events: none; \
z-index: 9999; opacity: 0; transition: opacity 0.3s ease; mix-blend-mode: difference;";
pub const CURSOR_INTERACTIVE_TARGETS: &str = "a, button, .skill-item, .contact-item";
pub const CURSOR_REST: CursorLook = CursorLook {
    transform: "scale(1)",
    background: "linear-gradient(135deg, #007AFF, #AF52DE)",
};
pub const CURSOR_ACTIVE: CursorLook = CursorLook {
    transform: "scale(1.5)",
    background: "linear-gradient(135deg, #FF2D92, #FF9500)",
};
const CURSOR_HALF_SIZE_PX: f64 = 10.0;

pub const TYPING_TARGET: &str = ".name-highlight";
pub const TYPING_CARET_BORDER: &str = "3px solid rgba(255, 255, 255, 0.8)";
pub const TYPING_CARET_ANIMATION: &str = "blink 1s infinite";
pub const TYPING_CARET_LINGER_MS: u32 = 1_000;

pub const ANCHOR_LINKS: &str = "a[href^=\"#\"]";

pub const KEYBOARD_NAVIGATION_CLASS: &str = "keyboard-navigation";
pub const KEYBOARD_FOCUS_STYLE: &str = ".keyboard-navigation *:focus { \
outline: 2px solid #007AFF !important; outline-offset: 2px !important; }";

pub const FADE_IN_TRANSITION: &str = "opacity 0.5s ease";
pub const FADE_IN_DELAY_MS: u32 = 100;

const PARALLAX_SPEED_STEP: f64 = 0.5;
const PARALLAX_RANGE_PX: f64 = 20.0;

pub const GRADIENT_PALETTE: [(&str, &str); 5] = [
    ("rgba(0,122,255,0.35)", "rgba(175,82,222,0.35)"),
    ("rgba(24,119,242,0.35)", "rgba(66,165,245,0.35)"),
    ("rgba(255,45,146,0.30)", "rgba(255,149,0,0.30)"),
    ("rgba(90,200,250,0.30)", "rgba(175,82,222,0.35)"),
    ("rgba(52,199,89,0.30)", "rgba(0,122,255,0.30)"),
];

/// Pointer coordinate as a fraction of the viewport extent.
pub fn pointer_fraction(client: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        client / extent
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxTransform {
    pub x: f64,
    pub y: f64,
    pub rotate_deg: f64,
}

impl ParallaxTransform {
    pub fn for_shape(index: usize, fraction_x: f64, fraction_y: f64) -> Self {
        let speed = (index as f64 + 1.0) * PARALLAX_SPEED_STEP;

        Self {
            x: (fraction_x - 0.5) * speed * PARALLAX_RANGE_PX,
            y: (fraction_y - 0.5) * speed * PARALLAX_RANGE_PX,
            rotate_deg: (fraction_x * 360.0).rem_euclid(360.0),
        }
    }

    pub fn to_css(self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg)",
            self.x, self.y, self.rotate_deg
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeSpec {
    pub size_px: u32,
    pub top_pct: u32,
    pub left_pct: u32,
    pub duration_s: f64,
    pub delay_s: f64,
    pub gradient: (&'static str, &'static str),
}

impl ShapeSpec {
    /// Draws one shape from `random`, which must yield values in `[0, 1)`.
    pub fn sample<R>(random: &mut R) -> Self
    where
        R: FnMut() -> f64,
    {
        let size_px = (40.0 + unit(random()) * 140.0).floor() as u32;
        let top_pct = (unit(random()) * 90.0).floor() as u32;
        let left_pct = (unit(random()) * 90.0).floor() as u32;
        let duration_s = round_tenths(14.0 + unit(random()) * 18.0);
        let delay_s = round_tenths(-unit(random()) * 18.0);
        let palette_len = GRADIENT_PALETTE.len();
        let palette_index =
            ((unit(random()) * palette_len as f64).floor() as usize).min(palette_len - 1);

        Self {
            size_px,
            top_pct,
            left_pct,
            duration_s,
            delay_s,
            gradient: GRADIENT_PALETTE[palette_index],
        }
    }

    pub fn css_text(&self) -> String {
        format!(
            "width:{size}px; height:{size}px; top:{top}%; left:{left}%; \
animation: float {duration:.1}s infinite linear; animation-delay:{delay:.1}s; \
background: linear-gradient(45deg, {from}, {to}); opacity: 0.5;",
            size = self.size_px,
            top = self.top_pct,
            left = self.left_pct,
            duration = self.duration_s,
            delay = self.delay_s,
            from = self.gradient.0,
            to = self.gradient.1,
        )
    }
}

pub fn generate_shapes<R>(count: usize, random: &mut R) -> Vec<ShapeSpec>
where
    R: FnMut() -> f64,
{
    (0..count).map(|_| ShapeSpec::sample(random)).collect()
}

fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn round_tenths(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    // -0.0 prints as "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    /// Square ripple covering the element, centred on the click point, in
    /// coordinates local to the element's bounding rect.
    pub fn from_click(rect: Rect, client_x: f64, client_y: f64) -> Self {
        let size = rect.width.max(rect.height);

        Self {
            size,
            left: client_x - rect.left - size / 2.0,
            top: client_y - rect.top - size / 2.0,
        }
    }

    pub fn css_text(self, duration_ms: u32) -> String {
        format!(
            "position: absolute; width: {size}px; height: {size}px; left: {left}px; top: {top}px; \
background: rgba(255, 255, 255, 0.3); border-radius: 50%; transform: scale(0); \
animation: ripple {secs}s linear; pointer-events: none;",
            size = self.size,
            left = self.left,
            top = self.top,
            secs = f64::from(duration_ms) / 1_000.0,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

pub fn background_transform(scroll_y: f64) -> String {
    format!("translateY({}px)", scroll_y * BACKGROUND_SCROLL_FACTOR)
}

pub fn is_in_viewport(rect: Rect, viewport_height: f64) -> bool {
    rect.top < viewport_height && rect.bottom() > 0.0
}

/// 0 when the element's top touches the viewport bottom, 1 once it reaches the
/// viewport top.
pub fn scroll_progress(element_top: f64, viewport_height: f64) -> f64 {
    if viewport_height <= 0.0 {
        return 0.0;
    }

    ((viewport_height - element_top) / viewport_height).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollBounce {
    pub offset_px: f64,
    pub scale: f64,
}

impl ScrollBounce {
    pub fn at(progress: f64) -> Self {
        Self {
            offset_px: progress * BOUNCE_OFFSET_PX,
            scale: 1.0 + (progress * PI).sin() * BOUNCE_SCALE_AMPLITUDE,
        }
    }

    pub fn to_css(self) -> String {
        format!("translateY({}px) scale({})", self.offset_px, self.scale)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorLook {
    pub transform: &'static str,
    pub background: &'static str,
}

/// Top-left corner that centres the 20px cursor on the pointer.
pub fn cursor_origin(client_x: f64, client_y: f64) -> (f64, f64) {
    (client_x - CURSOR_HALF_SIZE_PX, client_y - CURSOR_HALF_SIZE_PX)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleToggle {
    pub property: &'static str,
    pub active: &'static str,
    pub rest: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTarget {
    /// A single page-wide element, looked up once.
    Page(&'static str),
    /// A descendant of each trigger, looked up on every event.
    Child(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverEffect {
    pub name: &'static str,
    pub trigger: &'static str,
    pub target: HoverTarget,
    pub styles: &'static [StyleToggle],
}

pub const HOVER_EFFECTS: [HoverEffect; 3] = [
    HoverEffect {
        name: "profile_image_hover",
        trigger: ".image-wrapper",
        target: HoverTarget::Page(".profile-image"),
        styles: &[StyleToggle {
            property: "filter",
            active: "brightness(1.1) contrast(1.1)",
            rest: "brightness(1) contrast(1)",
        }],
    },
    HoverEffect {
        name: "skill_item_hover",
        trigger: ".skill-item",
        target: HoverTarget::Child(".skill-icon"),
        styles: &[StyleToggle {
            property: "transform",
            active: "scale(1.2) rotate(10deg)",
            rest: "scale(1) rotate(0deg)",
        }],
    },
    HoverEffect {
        name: "contact_item_hover",
        trigger: ".contact-item",
        target: HoverTarget::Child(".contact-icon"),
        styles: &[
            StyleToggle {
                property: "transform",
                active: "scale(1.1) rotate(5deg)",
                rest: "scale(1) rotate(0deg)",
            },
            StyleToggle {
                property: "box-shadow",
                active: "0 10px 30px rgba(0, 122, 255, 0.4)",
                rest: "none",
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn parallax_translation_scales_with_shape_index() {
        let first = ParallaxTransform::for_shape(0, 0.9, 0.2);

        for index in 1..12 {
            let shape = ParallaxTransform::for_shape(index, 0.9, 0.2);
            let factor = index as f64 + 1.0;
            assert!((shape.x - first.x * factor).abs() < EPSILON);
            assert!((shape.y - first.y * factor).abs() < EPSILON);
        }
    }

    #[test]
    fn parallax_centre_pointer_does_not_translate() {
        let shape = ParallaxTransform::for_shape(4, 0.5, 0.5);
        assert_eq!(shape.x, 0.0);
        assert_eq!(shape.y, 0.0);
        assert_eq!(shape.rotate_deg, 180.0);
    }

    #[test]
    fn parallax_rotation_stays_within_one_turn() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..500 {
            let fraction = rng.f64();
            let shape = ParallaxTransform::for_shape(rng.usize(0..30), fraction, rng.f64());
            assert!((0.0..360.0).contains(&shape.rotate_deg));
        }

        assert_eq!(ParallaxTransform::for_shape(0, 1.0, 0.0).rotate_deg, 0.0);
    }

    #[test]
    fn parallax_css_matches_browser_format() {
        let css = ParallaxTransform::for_shape(1, 0.75, 0.25).to_css();
        assert_eq!(css, "translate(5px, -5px) rotate(270deg)");
    }

    #[test]
    fn pointer_fraction_guards_zero_viewport() {
        assert_eq!(pointer_fraction(320.0, 0.0), 0.0);
        assert_eq!(pointer_fraction(320.0, 640.0), 0.5);
    }

    #[test]
    fn generated_shapes_stay_in_range() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut random = || rng.f64();
        let shapes = generate_shapes(20, &mut random);

        assert_eq!(shapes.len(), 20);
        for shape in &shapes {
            assert!((40..=180).contains(&shape.size_px));
            assert!(shape.top_pct <= 90);
            assert!(shape.left_pct <= 90);
            assert!((14.0..=32.0).contains(&shape.duration_s));
            assert!((-18.0..=0.0).contains(&shape.delay_s));
            assert!(GRADIENT_PALETTE.contains(&shape.gradient));
        }
    }

    #[test]
    fn shape_extremes_map_to_range_edges() {
        let mut low = || 0.0;
        let shape = ShapeSpec::sample(&mut low);
        assert_eq!(shape.size_px, 40);
        assert_eq!(shape.top_pct, 0);
        assert_eq!(shape.duration_s, 14.0);
        assert_eq!(shape.delay_s, 0.0);
        assert_eq!(shape.gradient, GRADIENT_PALETTE[0]);

        let mut high = || 1.0;
        let shape = ShapeSpec::sample(&mut high);
        assert_eq!(shape.size_px, 180);
        assert_eq!(shape.left_pct, 90);
        assert_eq!(shape.duration_s, 32.0);
        assert_eq!(shape.delay_s, -18.0);
        assert_eq!(shape.gradient, GRADIENT_PALETTE[4]);
    }

    #[test]
    fn shape_css_text_carries_animation_and_gradient() {
        let shape = ShapeSpec {
            size_px: 64,
            top_pct: 12,
            left_pct: 30,
            duration_s: 20.5,
            delay_s: -3.2,
            gradient: GRADIENT_PALETTE[2],
        };

        let css = shape.css_text();
        assert!(css.contains("width:64px; height:64px;"));
        assert!(css.contains("top:12%; left:30%;"));
        assert!(css.contains("animation: float 20.5s infinite linear;"));
        assert!(css.contains("animation-delay:-3.2s;"));
        assert!(css.contains(
            "linear-gradient(45deg, rgba(255,45,146,0.30), rgba(255,149,0,0.30))"
        ));
    }

    #[test]
    fn ripple_is_square_of_longest_side_centred_on_click() {
        let rect = Rect {
            left: 100.0,
            top: 50.0,
            width: 240.0,
            height: 80.0,
        };
        let ripple = RippleGeometry::from_click(rect, 130.0, 70.0);

        assert_eq!(ripple.size, 240.0);
        assert_eq!(
            (ripple.left + ripple.size / 2.0, ripple.top + ripple.size / 2.0),
            (30.0, 20.0)
        );
        assert_eq!(ripple.left, -90.0);
        assert_eq!(ripple.top, -100.0);
    }

    #[test]
    fn ripple_css_uses_configured_duration() {
        let ripple = RippleGeometry {
            size: 40.0,
            left: 1.0,
            top: 2.0,
        };
        let css = ripple.css_text(600);
        assert!(css.contains("animation: ripple 0.6s linear;"));
        assert!(css.contains("width: 40px; height: 40px; left: 1px; top: 2px;"));
    }

    #[test]
    fn scroll_progress_is_clamped() {
        assert_eq!(scroll_progress(800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(900.0, 800.0), 0.0);
        assert_eq!(scroll_progress(0.0, 800.0), 1.0);
        assert_eq!(scroll_progress(-200.0, 800.0), 1.0);
        assert_eq!(scroll_progress(400.0, 800.0), 0.5);
        assert_eq!(scroll_progress(10.0, 0.0), 0.0);
    }

    #[test]
    fn bounce_peaks_mid_viewport() {
        let rest = ScrollBounce::at(0.0);
        assert_eq!(rest.offset_px, 0.0);
        assert_eq!(rest.scale, 1.0);

        let mid = ScrollBounce::at(0.5);
        assert!((mid.scale - 1.05).abs() < EPSILON);
        assert_eq!(mid.offset_px, 5.0);

        let end = ScrollBounce::at(1.0);
        assert!((end.scale - 1.0).abs() < EPSILON);
        assert_eq!(end.offset_px, 10.0);
    }

    #[test]
    fn viewport_check_uses_top_and_bottom_edges() {
        let visible = Rect {
            left: 0.0,
            top: -10.0,
            width: 100.0,
            height: 20.0,
        };
        let above = Rect { top: -30.0, ..visible };
        let below = Rect { top: 800.0, ..visible };

        assert!(is_in_viewport(visible, 800.0));
        assert!(!is_in_viewport(above, 800.0));
        assert!(!is_in_viewport(below, 800.0));
    }

    #[test]
    fn background_moves_at_thirty_percent() {
        assert_eq!(background_transform(100.0), "translateY(30px)");
    }

    #[test]
    fn cursor_is_centred_on_pointer() {
        assert_eq!(cursor_origin(110.0, 20.0), (100.0, 10.0));
    }

    #[test]
    fn hover_effects_restore_every_property_they_touch() {
        for effect in HOVER_EFFECTS {
            assert!(!effect.styles.is_empty(), "{} has no styles", effect.name);
            for toggle in effect.styles {
                assert_ne!(toggle.active, toggle.rest);
            }
        }
    }
}
