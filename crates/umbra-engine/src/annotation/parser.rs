//! Parser for the shadow parameter mini-language.
//!
//! ```text
//! type|px:py|*sx:sy|&angle
//! ```
//!
//! Every segment is optional. `type` is `real`, `circle` or `none`;
//! `px`/`py`/`sx`/`sy` are signed percentages of the subject's size;
//! `angle` is signed whole degrees. Blank and zero values mean "inherit".
//! Anything that does not fit the grammar yields an empty override.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use crate::components::profile::{ShadowOverride, ShadowShape};

/// One `|`-separated segment, anchored. Exactly one branch participates:
/// a bare word (type), `*sx:sy` (scale), `&deg` (angle) or `px:py` (position).
static RE_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<shape>[A-Za-z]+)|(?P<scale>\*)\s*(?P<sx>[-+.\d]*)\s*(?::\s*(?P<sy>[-+.\d]*))?|(?P<angle>&)\s*(?P<deg>[-+]?\d+)?|(?P<px>[-+.\d]*)\s*(?::\s*(?P<py>[-+.\d]*))?)$",
    )
    .unwrap()
});

/// Segment kinds in the order they must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Shape,
    Position,
    Scale,
    Angle,
}

/// Parse annotation text into a sparse override. Never fails: malformed
/// text degrades to an empty override.
pub fn parse(text: &str) -> ShadowOverride {
    match try_parse(text) {
        Some(ov) => ov,
        None => {
            log::debug!("ignoring malformed shadow annotation {:?}", text);
            ShadowOverride::default()
        }
    }
}

fn try_parse(text: &str) -> Option<ShadowOverride> {
    let mut ov = ShadowOverride::default();
    let mut last: Option<Segment> = None;

    for raw in text.trim().split('|') {
        let seg = raw.trim();
        if seg.is_empty() {
            continue;
        }

        let caps = RE_SEGMENT.captures(seg)?;
        let kind = kind_of(&caps);
        if last.is_some_and(|prev| kind <= prev) {
            return None;
        }
        last = Some(kind);

        match kind {
            Segment::Shape => {
                ov.shape = Some(ShadowShape::from_keyword(&caps["shape"])?);
            }
            Segment::Position => {
                ov.offset_x = percent(&caps, "px")?;
                ov.offset_y = percent(&caps, "py")?;
            }
            Segment::Scale => {
                ov.scale_x = percent(&caps, "sx")?;
                ov.scale_y = percent(&caps, "sy")?;
            }
            Segment::Angle => {
                if let Some(deg) = caps.name("deg") {
                    let degrees: i32 = deg.as_str().parse().ok()?;
                    ov.rotation = (degrees != 0).then_some(degrees as f32);
                }
            }
        }
    }

    Some(ov)
}

fn kind_of(caps: &Captures) -> Segment {
    if caps.name("shape").is_some() {
        Segment::Shape
    } else if caps.name("scale").is_some() {
        Segment::Scale
    } else if caps.name("angle").is_some() {
        Segment::Angle
    } else {
        Segment::Position
    }
}

/// Read a signed decimal percentage group as a fraction. Outer `None` =
/// malformed (e.g. `1.2.3`), inner `None` = absent, blank or zero (inherit).
fn percent(caps: &Captures, group: &str) -> Option<Option<f32>> {
    let text = caps.name(group).map_or("", |m| m.as_str());
    if text.is_empty() {
        return Some(None);
    }
    let value: f32 = text.parse().ok()?;
    Some((value != 0.0).then_some(value / 100.0))
}
