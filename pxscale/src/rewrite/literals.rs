//! Wraps integer style literals (`fontSize: 48`) with the scaling helper.

use super::options::wrap;
use super::{
    apply_edits, next_significant_byte, starts_identifier, Pass, PassOutput, TextPass, Thresholds,
};
use crate::constants::DIMENSION_BAND;
use crate::fix::Edit;
use regex::Regex;

/// What may follow the literal for it to be wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trailer {
    /// Anything except the listed bytes (after optional whitespace).
    NotFollowedBy(&'static [u8]),
    /// One of the listed bytes (after optional whitespace).
    FollowedBy(&'static [u8]),
}

impl Trailer {
    fn allows(self, next: Option<u8>) -> bool {
        match self {
            Trailer::NotFollowedBy(bytes) => next.map_or(true, |b| !bytes.contains(&b)),
            Trailer::FollowedBy(bytes) => next.is_some_and(|b| bytes.contains(&b)),
        }
    }
}

/// Value range a literal must fall in (both bounds exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Band {
    above: u64,
    below: Option<u64>,
}

impl Band {
    fn contains(self, value: u64) -> bool {
        value > self.above && self.below.map_or(true, |max| value < max)
    }
}

/// Wraps `<property>: <integer>` for one or more properties.
#[derive(Debug)]
pub struct LiteralPass {
    pass: Pass,
    helper: String,
    property_re: Regex,
    bands: Vec<(&'static str, Band)>,
    trailer: Trailer,
}

impl LiteralPass {
    fn build(
        pass: Pass,
        helper: &str,
        bands: Vec<(&'static str, Band)>,
        trailer: Trailer,
    ) -> Result<Self, regex::Error> {
        let names: Vec<&str> = bands.iter().map(|(name, _)| *name).collect();
        let property_re = Regex::new(&format!(r"({}):\s*([0-9]+)", names.join("|")))?;
        Ok(Self {
            pass,
            helper: helper.to_owned(),
            property_re,
            bands,
            trailer,
        })
    }

    fn single(
        pass: Pass,
        property: &'static str,
        helper: &str,
        threshold: u64,
        trailer: Trailer,
    ) -> Result<Self, regex::Error> {
        let band = Band {
            above: threshold,
            below: None,
        };
        Self::build(pass, helper, vec![(property, band)], trailer)
    }

    /// `fontSize: N`, wrapped when N > `threshold`.
    pub fn font_size(helper: &str, threshold: u64) -> Result<Self, regex::Error> {
        Self::single(Pass::FontSize, "fontSize", helper, threshold, NOT_SCALED)
    }

    /// `gap: N`, wrapped when N > `threshold`.
    pub fn gap(helper: &str, threshold: u64) -> Result<Self, regex::Error> {
        Self::single(Pass::Gap, "gap", helper, threshold, NOT_SCALED)
    }

    /// `marginTop: N`, wrapped when N > `threshold`.
    pub fn margin_top(helper: &str, threshold: u64) -> Result<Self, regex::Error> {
        Self::single(Pass::MarginTop, "marginTop", helper, threshold, NOT_SCALED)
    }

    /// `marginBottom: N`, wrapped when N > `threshold`.
    pub fn margin_bottom(helper: &str, threshold: u64) -> Result<Self, regex::Error> {
        Self::single(
            Pass::MarginBottom,
            "marginBottom",
            helper,
            threshold,
            NOT_SCALED,
        )
    }

    /// `borderRadius: N`, wrapped when N > `threshold` and not a percentage.
    pub fn border_radius(helper: &str, threshold: u64) -> Result<Self, regex::Error> {
        Self::single(
            Pass::BorderRadius,
            "borderRadius",
            helper,
            threshold,
            Trailer::NotFollowedBy(b"*%"),
        )
    }

    /// `width: N` / `height: N` ending a property, wrapped inside the dimension band.
    pub fn dimensions(helper: &str) -> Result<Self, regex::Error> {
        let (above, below) = DIMENSION_BAND;
        let band = Band {
            above,
            below: Some(below),
        };
        Self::build(
            Pass::Dimensions,
            helper,
            vec![("width", band), ("height", band)],
            END_OF_PROPERTY,
        )
    }

    /// `top`/`bottom`/`left`/`right: N` ending a property.
    pub fn position(helper: &str, thresholds: &Thresholds) -> Result<Self, regex::Error> {
        let band = |above| Band { above, below: None };
        Self::build(
            Pass::Position,
            helper,
            vec![
                ("top", band(thresholds.top)),
                ("bottom", band(thresholds.bottom)),
                ("left", band(thresholds.left)),
                ("right", band(thresholds.right)),
            ],
            END_OF_PROPERTY,
        )
    }

    fn band_for(&self, property: &str) -> Option<Band> {
        self.bands
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, band)| *band)
    }
}

/// Already-scaled expressions (`fontSize: 24 * scale`) are left alone.
const NOT_SCALED: Trailer = Trailer::NotFollowedBy(b"*");

/// The literal is the whole property value.
const END_OF_PROPERTY: Trailer = Trailer::FollowedBy(b",}");

impl TextPass for LiteralPass {
    fn pass(&self) -> Pass {
        self.pass
    }

    fn run(&self, source: &str) -> PassOutput {
        let mut edits = Vec::new();
        for caps in self.property_re.captures_iter(source) {
            let (Some(whole), Some(prop), Some(value)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            if !starts_identifier(source, whole.start()) {
                continue;
            }
            // `fontSize: 1.5` is not an integer literal.
            if source.as_bytes().get(value.end()) == Some(&b'.') {
                continue;
            }
            if !self
                .trailer
                .allows(next_significant_byte(source, value.end()))
            {
                continue;
            }
            let Ok(n) = value.as_str().parse::<u64>() else {
                continue;
            };
            if self.band_for(prop.as_str()).is_some_and(|b| b.contains(n)) {
                edits.push(Edit::new(
                    whole.start(),
                    whole.end(),
                    format!("{}: {}", prop.as_str(), wrap(&self.helper, value.as_str())),
                ));
            }
        }
        apply_edits(source, edits)
    }
}
