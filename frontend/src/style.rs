//! Presentation layer: maps each behavior's named state onto the inline
//! declarations the page's stylesheet expects. Behavior code decides the
//! state; only this module knows what it looks like.

use crate::behaviors::beans::BeanSpec;
use crate::behaviors::fade::{FadeState, FadeStyle};
use crate::behaviors::header::HeaderState;
use crate::behaviors::menu::MenuItemState;
use crate::behaviors::nav::NavLinkState;
use crate::behaviors::parallax::ParallaxTransform;

pub type Declarations = Vec<(&'static str, String)>;

pub trait Presentation {
    fn declarations(&self) -> Declarations;
}

fn decls(pairs: &[(&'static str, &str)]) -> Declarations {
    pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

impl Presentation for HeaderState {
    fn declarations(&self) -> Declarations {
        match self {
            HeaderState::Resting => decls(&[
                ("background", "rgba(111, 78, 55, 0.95)"),
                ("box-shadow", "none"),
            ]),
            HeaderState::Scrolled => decls(&[
                ("background", "rgba(111, 78, 55, 0.98)"),
                ("box-shadow", "0 2px 10px rgba(111, 78, 55, 0.3)"),
            ]),
        }
    }
}

impl Presentation for NavLinkState {
    fn declarations(&self) -> Declarations {
        match self {
            NavLinkState::Active => decls(&[
                ("color", "var(--coffee-orange)"),
                ("border-bottom", "2px solid var(--coffee-orange)"),
            ]),
        }
    }
}

impl Presentation for MenuItemState {
    fn declarations(&self) -> Declarations {
        match self {
            MenuItemState::Resting => decls(&[("transform", "translateY(0) scale(1)")]),
            MenuItemState::Lifted => decls(&[("transform", "translateY(-10px) scale(1.02)")]),
        }
    }
}

impl Presentation for ParallaxTransform {
    fn declarations(&self) -> Declarations {
        vec![(
            "transform",
            format!("translate3d(0, {}px, 0) scale({})", self.translate_y, self.scale),
        )]
    }
}

impl Presentation for FadeStyle<'_> {
    fn declarations(&self) -> Declarations {
        match self.state {
            FadeState::Hidden => vec![
                ("opacity", "0".to_string()),
                ("transition", self.transition.to_string()),
            ],
            FadeState::Visible => decls(&[("opacity", "1")]),
        }
    }
}

/// The full-viewport layer holding the beans.
pub struct BeanLayer;

pub const BEAN_LAYER_CLASS: &str = "coffee-beans-bg";

impl Presentation for BeanLayer {
    fn declarations(&self) -> Declarations {
        decls(&[
            ("position", "fixed"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100vw"),
            ("height", "100vh"),
            ("pointer-events", "none"),
            ("z-index", "-1"),
            ("overflow", "hidden"),
        ])
    }
}

impl Presentation for BeanSpec {
    fn declarations(&self) -> Declarations {
        let mut out = decls(&[
            ("position", "absolute"),
            ("width", "8px"),
            ("height", "12px"),
            ("background", "#8B4513"),
            ("border-radius", "50% 50% 50% 50% / 60% 60% 40% 40%"),
            ("opacity", "0.1"),
        ]);
        out.push((
            "animation",
            format!("float {}s ease-in-out infinite", self.duration_secs),
        ));
        out.push(("top", format!("{}%", self.top_pct)));
        out.push(("left", format!("{}%", self.left_pct)));
        out.push(("animation-delay", format!("{}s", self.delay_secs)));
        out
    }
}

/// Keyframes for the bean drift, injected once into the document head.
pub const FLOAT_KEYFRAMES: &str = r#"
  @keyframes float {
    0%, 100% {
      transform: translateY(0px) rotate(0deg);
    }
    50% {
      transform: translateY(-20px) rotate(180deg);
    }
  }
"#;
