//! Hover tooltip content and placement.

use crate::config::TooltipConfig;
use crate::dataset::{Argument, ArgumentKey};
use crate::geom::{Point, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub key: ArgumentKey,
    pub body: String,
    /// Vote summary, present only when the source comment has votes.
    pub meta: Option<String>,
    /// Page position of the tooltip's top-left corner, once placed.
    pub position: Option<Point>,
}

impl Tooltip {
    pub fn for_argument(key: ArgumentKey, arg: &Argument) -> Self {
        Self {
            key,
            body: arg.argument.clone(),
            meta: vote_summary(arg),
            position: None,
        }
    }
}

fn vote_summary(arg: &Argument) -> Option<String> {
    if arg.votes == 0 && arg.disagrees == 0 {
        return None;
    }
    // Integer percent: keeps float formatting out of wasm builds.
    let pct = arg.consensus.round() as i64;
    Some(format!(
        "Agree {} · Disagree {} · {}% consensus",
        arg.votes, arg.disagrees, pct
    ))
}

/// Top-left page position for a tooltip of `size` shown at `pointer`.
///
/// Default spot is up and to the right of the pointer. It flips to the left
/// when it would cross the right viewport edge, and drops below the pointer
/// when it would cross the top edge.
pub fn place(pointer: Point, size: Size, viewport: Size, cfg: &TooltipConfig) -> Point {
    let mut left = pointer.x + cfg.offset_x;
    let mut top = pointer.y + cfg.offset_y;

    if left + size.width > viewport.width - cfg.edge_padding {
        left = pointer.x - size.width - cfg.flip_gap;
    }
    if top < cfg.edge_padding {
        top = pointer.y + cfg.drop_offset;
    }
    Point::new(left, top)
}
