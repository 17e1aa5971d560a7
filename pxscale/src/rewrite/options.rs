use crate::constants::{
    DEFAULT_COMPONENT_PREFIX, DEFAULT_CONTEXT_CALLS, DEFAULT_GLOW_COMPONENT, DEFAULT_HELPER,
    DEFAULT_HOOK, DEFAULT_IMPORT_MODULE,
};

/// Values above which a style property literal is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// `fontSize`
    pub font_size: u64,
    /// `gap`
    pub gap: u64,
    /// `marginTop`
    pub margin_top: u64,
    /// `marginBottom`
    pub margin_bottom: u64,
    /// `borderRadius`
    pub border_radius: u64,
    /// `top`
    pub top: u64,
    /// `bottom`
    pub bottom: u64,
    /// `left`
    pub left: u64,
    /// `right`
    pub right: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            font_size: 10,
            gap: 4,
            margin_top: 4,
            margin_bottom: 4,
            border_radius: 4,
            top: 10,
            bottom: 10,
            left: 10,
            right: 10,
        }
    }
}

impl Thresholds {
    /// Threshold for a style property as written in source (`fontSize`, `top`, ...).
    #[must_use]
    pub fn get(&self, property: &str) -> Option<u64> {
        Some(match property {
            "fontSize" => self.font_size,
            "gap" => self.gap,
            "marginTop" => self.margin_top,
            "marginBottom" => self.margin_bottom,
            "borderRadius" => self.border_radius,
            "top" => self.top,
            "bottom" => self.bottom,
            "left" => self.left,
            "right" => self.right,
            _ => return None,
        })
    }

    /// Override one threshold. Returns `false` for an unknown property.
    pub fn set(&mut self, property: &str, value: u64) -> bool {
        let slot = match property {
            "fontSize" => &mut self.font_size,
            "gap" => &mut self.gap,
            "marginTop" => &mut self.margin_top,
            "marginBottom" => &mut self.margin_bottom,
            "borderRadius" => &mut self.border_radius,
            "top" => &mut self.top,
            "bottom" => &mut self.bottom,
            "left" => &mut self.left,
            "right" => &mut self.right,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Names and thresholds the passes work with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleOptions {
    /// Local binding of the scaling function (`s`).
    pub helper: String,
    /// Hook returning the scaling function (`useScale`).
    pub hook: String,
    /// Module the hook is imported from (`./shared`).
    pub import_module: String,
    /// Prefix of scene component names (`Scene`).
    pub component_prefix: String,
    /// Calls after which the binding is injected.
    pub context_calls: Vec<String>,
    /// Component whose `size` prop is always scaled.
    pub glow_component: String,
    /// Per-property thresholds.
    pub thresholds: Thresholds,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            helper: DEFAULT_HELPER.to_owned(),
            hook: DEFAULT_HOOK.to_owned(),
            import_module: DEFAULT_IMPORT_MODULE.to_owned(),
            component_prefix: DEFAULT_COMPONENT_PREFIX.to_owned(),
            context_calls: DEFAULT_CONTEXT_CALLS.iter().map(|&c| c.to_owned()).collect(),
            glow_component: DEFAULT_GLOW_COMPONENT.to_owned(),
            thresholds: Thresholds::default(),
        }
    }
}

impl ScaleOptions {
    /// The line injected into each component: `const s = useScale();`.
    #[must_use]
    pub fn binding_line(&self) -> String {
        format!("const {} = {}();", self.helper, self.hook)
    }
}

pub(crate) fn wrap(helper: &str, literal: &str) -> String {
    format!("{helper}({literal})")
}
