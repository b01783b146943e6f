// Label and icon the status item shows for each curtain state.

/// SF Symbol shown while the screen is undimmed.
pub const ICON_OPEN: &str = "curtains.open";
/// SF Symbol shown while overlays are up.
pub const ICON_CLOSED: &str = "curtains.closed";

/// What the status button shows: the state's symbol, or a text glyph when the
/// symbol cannot be loaded. Exactly one of the two is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonFace {
    pub symbol: Option<&'static str>,
    pub title: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPresentation {
    pub closed: bool,
    /// Title of the toggle menu item, i.e. the action it will perform.
    pub toggle_title: &'static str,
    pub icon: &'static str,
    pub accessibility: &'static str,
}

impl StatusPresentation {
    pub fn for_state(closed: bool) -> Self {
        if closed {
            Self {
                closed,
                toggle_title: "Open Curtains",
                icon: ICON_CLOSED,
                accessibility: "Curtains Closed",
            }
        } else {
            Self {
                closed,
                toggle_title: "Draw Curtains",
                icon: ICON_OPEN,
                accessibility: "Curtains Open",
            }
        }
    }

    pub fn button_face(&self, symbol_available: bool) -> ButtonFace {
        if symbol_available {
            ButtonFace {
                symbol: Some(self.icon),
                title: "",
            }
        } else {
            ButtonFace {
                symbol: None,
                title: if self.closed { "▮" } else { "▯" },
            }
        }
    }

    /// Slider position as a whole percentage, for the popover label.
    pub fn percent_label(intensity: f64) -> String {
        format!("{}%", (intensity * 100.0).round() as i32)
    }
}
